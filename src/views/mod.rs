pub mod staking_panel;

pub use staking_panel::{render_staking_panel, PanelHandles, STAKE_INPUT_ID};
