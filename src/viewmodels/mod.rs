pub mod action_slot;
pub mod staking_viewmodel;

pub use action_slot::{ActionSlot, ActionSlotGuard};
pub use staking_viewmodel::{PanelControls, PanelProviders, StakingViewModel};
