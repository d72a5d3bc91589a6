pub mod rpc_client;
pub mod panel_timers;

pub use rpc_client::*;
pub use panel_timers::*;
