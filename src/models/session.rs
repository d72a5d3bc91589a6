// ============================================================================
// STAKING SESSION - Estado de un panel montado
// ============================================================================

use serde::{Deserialize, Serialize};
use crate::models::action::{ActionKind, ActionPhase};
use crate::models::amount::round4;
use crate::models::cooldown::CooldownStatus;

/// Sesión de staking (una por panel, se destruye al desmontar)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StakingSession {
    pub wallet_id: Option<String>,
    /// Espejo del Balance Provider, el panel nunca lo modifica
    pub balance: f64,
    pub balance_loading: bool,
    pub stake_input: String,
    pub staked_amount: f64,
    pub pending_reward: f64,
    pub compound_streak: u32,
    pub total_value_locked: f64,
    pub last_action_timestamp: i64,
    pub phase: ActionPhase,
    pub active_action: Option<ActionKind>,
    pub last_error: Option<String>,
    pub cooldown: CooldownStatus,
}

impl StakingSession {
    pub fn new(stake_input: impl Into<String>, initial_pending_reward: f64) -> Self {
        Self {
            wallet_id: None,
            balance: 0.0,
            balance_loading: false,
            stake_input: stake_input.into(),
            staked_amount: 0.0,
            pending_reward: round4(initial_pending_reward.max(0.0)),
            compound_streak: 0,
            total_value_locked: 0.0,
            last_action_timestamp: 0,
            phase: ActionPhase::Idle,
            active_action: None,
            last_error: None,
            cooldown: CooldownStatus::default(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.wallet_id.is_some()
    }

    /// true solo durante la fase `executing`
    pub fn action_in_flight(&self) -> bool {
        self.phase == ActionPhase::Executing
    }

    /// Efectos de un stake liquidado
    pub fn apply_stake(&mut self, amount: f64, now: i64) {
        self.staked_amount = round4(self.staked_amount + amount);
        self.total_value_locked = round4(self.total_value_locked + amount);
        self.stake_input.clear();
        self.last_action_timestamp = now;
    }

    /// Efectos de un compound liquidado; retorna el reward reinvertido
    pub fn apply_compound(&mut self, now: i64) -> f64 {
        let reward = self.pending_reward;
        self.staked_amount = round4(self.staked_amount + reward);
        self.total_value_locked = round4(self.total_value_locked + reward);
        self.pending_reward = 0.0;
        self.compound_streak += 1;
        self.last_action_timestamp = now;
        reward
    }

    /// Efectos de un claim liquidado; el reward sale del pool
    pub fn apply_claim(&mut self, now: i64) -> f64 {
        let reward = self.pending_reward;
        self.pending_reward = 0.0;
        self.compound_streak = 0;
        self.last_action_timestamp = now;
        reward
    }

    /// Un tick de acumulación de rewards
    pub fn accrue(&mut self, quantum: f64) {
        self.pending_reward = round4(self.pending_reward + quantum);
    }
}

impl Default for StakingSession {
    fn default() -> Self {
        Self::new("", 0.0)
    }
}

/// Acortar el id de la wallet para el footer: `ABCD...WXYZ`
pub fn short_wallet_id(wallet_id: &str) -> String {
    let chars: Vec<char> = wallet_id.chars().collect();
    if chars.len() <= 8 {
        return wallet_id.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
