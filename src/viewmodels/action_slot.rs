// ============================================================================
// ACTION SLOT - Exclusión mutua de un solo lugar para las acciones
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{ActionKind, ActionPhase};
use crate::state::StakingState;

/// Token de exclusión mutua: como máximo una acción a la vez
#[derive(Clone, Default)]
pub struct ActionSlot {
    held: Rc<Cell<Option<ActionKind>>>,
}

impl ActionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acción que ocupa el slot, si hay una
    pub fn holder(&self) -> Option<ActionKind> {
        self.held.get()
    }

    /// Ocupar el slot o retornar la acción que ya lo tiene
    pub fn try_acquire(&self, action: ActionKind, state: &StakingState) -> Result<ActionSlotGuard, ActionKind> {
        if let Some(in_flight) = self.held.get() {
            return Err(in_flight);
        }
        self.held.set(Some(action));
        Ok(ActionSlotGuard {
            held: self.held.clone(),
            state: state.clone(),
        })
    }
}

/// Libera el slot y vuelve la fase a Idle en su Drop, tanto en éxito como en error
pub struct ActionSlotGuard {
    held: Rc<Cell<Option<ActionKind>>>,
    state: StakingState,
}

impl Drop for ActionSlotGuard {
    fn drop(&mut self) {
        self.held.set(None);
        self.state.set_phase(ActionPhase::Idle, None);
    }
}
