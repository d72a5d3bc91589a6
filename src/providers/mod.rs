// Providers del panel: traits comunes + implementaciones por plataforma

pub mod traits;
pub mod web;

#[cfg(test)]
pub mod testing;

pub use traits::*;
pub use web::{InjectedWallet, RpcBalanceProvider, SimulatedSettlement, SystemClock};
