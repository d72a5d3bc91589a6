// ============================================================================
// PROVIDER TRAITS - Colaboradores externos del panel
// ============================================================================

use async_trait::async_trait;
use crate::models::ActionKind;

/// Identidad de la wallet conectada (presencia = conectada)
pub trait WalletProvider {
    fn wallet_id(&self) -> Option<String>;
}

/// Balance gastable de la cuenta conectada
#[async_trait(?Send)]
pub trait BalanceProvider {
    fn balance(&self) -> f64;

    fn is_loading(&self) -> bool;

    /// Volver a pedir el balance
    async fn refetch(&self) -> Result<(), String>;
}

/// Fuente de tiempo en segundos epoch, monótona no decreciente
pub trait Clock {
    fn now(&self) -> i64;
}

/// Liquidación asíncrona de una acción (simulada en el navegador)
#[async_trait(?Send)]
pub trait SettlementGateway {
    async fn settle(&self, action: ActionKind) -> Result<(), String>;
}
