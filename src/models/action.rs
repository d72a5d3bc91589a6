use serde::{Deserialize, Serialize};

/// Acciones del usuario sobre el pool simulado
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Stake,
    Compound,
    Claim,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Stake => "stake",
            ActionKind::Compound => "compound",
            ActionKind::Claim => "claim",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fase del ciclo de una acción (idle → validating → executing → idle)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ActionPhase {
    #[default]
    Idle,
    Validating,
    Executing,
}

/// Resultado de una acción liquidada
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    pub action: ActionKind,
    /// Monto que entró al pool (stake o reward reinvertido), 0 para claim
    pub amount: f64,
    pub settled_at: i64,
}
