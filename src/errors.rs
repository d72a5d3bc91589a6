// ============================================================================
// ERRORS - Errores tipados de las acciones del panel
// ============================================================================
// Todos se recuperan en el ViewModel: el mensaje va a `last_error` y nunca
// se propagan fuera del panel.
// ============================================================================

use thiserror::Error;
use crate::models::ActionKind;

/// Error de validación del input (antes de cualquier paso async)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid stake amount.")]
    InvalidAmount,

    #[error("Insufficient balance for staking.")]
    InsufficientBalance,
}

/// Error de una acción de staking
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StakingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Please wait for the cooldown to finish.")]
    Cooldown { remaining: i64 },

    #[error("Failed to {action}. Please try again.")]
    Execution { action: ActionKind, reason: String },

    #[error("Another action is already in progress.")]
    ConcurrentAction { in_flight: ActionKind },
}

impl StakingError {
    /// Mensaje para el banner de error del panel
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Los rechazos por concurrencia no tocan la sesión
    pub fn updates_last_error(&self) -> bool {
        !matches!(self, StakingError::ConcurrentAction { .. })
    }
}

/// Result de las acciones del panel
pub type StakingResult<T> = Result<T, StakingError>;
