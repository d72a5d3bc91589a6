// ============================================================================
// STAKING STATE - Estado reactivo de la sesión de staking
// ============================================================================

use crate::models::{ActionKind, ActionPhase, CooldownStatus, StakingSession};
use crate::state::reactivity::ReactiveState;

/// Estado del panel: envuelve la sesión en un ReactiveState
#[derive(Clone)]
pub struct StakingState {
    session: ReactiveState<StakingSession>,
}

impl StakingState {
    pub fn new(session: StakingSession) -> Self {
        Self {
            session: ReactiveState::new(session),
        }
    }

    pub fn snapshot(&self) -> StakingSession {
        self.session.snapshot()
    }

    pub fn with<R>(&self, reader: impl FnOnce(&StakingSession) -> R) -> R {
        self.session.with(reader)
    }

    pub fn update<R>(&self, updater: impl FnOnce(&mut StakingSession) -> R) -> R {
        self.session.update(updater)
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.session.subscribe(callback);
    }

    pub fn phase(&self) -> ActionPhase {
        self.with(|s| s.phase)
    }

    pub fn set_phase(&self, phase: ActionPhase, action: Option<ActionKind>) {
        self.update(|s| {
            s.phase = phase;
            s.active_action = action;
        });
    }

    pub fn set_error(&self, message: Option<String>) {
        self.update(|s| s.last_error = message);
    }

    /// Lo escribe el propio `<input>`, no hace falta re-render
    pub fn set_stake_input(&self, input: impl Into<String>) {
        let input = input.into();
        self.session.update_silent(|s| s.stake_input = input);
    }

    pub fn stake_input(&self) -> String {
        self.with(|s| s.stake_input.clone())
    }

    pub fn set_cooldown(&self, status: CooldownStatus) {
        // Evitar re-render si el tick no cambió nada
        if self.with(|s| s.cooldown == status) {
            return;
        }
        self.update(|s| s.cooldown = status);
    }

    pub fn cooldown(&self) -> CooldownStatus {
        self.with(|s| s.cooldown)
    }

    /// Sincronizar wallet y balance desde los providers
    pub fn set_external(&self, wallet_id: Option<String>, balance: f64, balance_loading: bool) {
        let unchanged = self.with(|s| {
            s.wallet_id == wallet_id && s.balance == balance && s.balance_loading == balance_loading
        });
        if unchanged {
            return;
        }
        self.update(|s| {
            s.wallet_id = wallet_id;
            s.balance = balance;
            s.balance_loading = balance_loading;
        });
    }
}

impl Default for StakingState {
    fn default() -> Self {
        Self::new(StakingSession::default())
    }
}
