// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod staking_state;

pub use reactivity::*;
pub use staking_state::*;
