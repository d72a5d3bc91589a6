// ============================================================================
// WEB PROVIDERS - Implementaciones para el navegador
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::{lamports_to_sol, ActionKind};
use crate::providers::traits::{BalanceProvider, Clock, SettlementGateway, WalletProvider};
use crate::services::RpcClient;

/// Wallet inyectada por la extensión del navegador (`window.solana`)
#[derive(Clone, Default)]
pub struct InjectedWallet;

impl InjectedWallet {
    pub fn new() -> Self {
        Self
    }

    fn provider_object() -> Option<JsValue> {
        let window = web_sys::window()?;
        let provider = js_sys::Reflect::get(&window, &JsValue::from_str("solana")).ok()?;
        if provider.is_undefined() || provider.is_null() {
            return None;
        }
        Some(provider)
    }

    /// Pedir conexión a la extensión (`window.solana.connect()`)
    pub async fn request_connect(&self) -> Result<(), String> {
        let provider = Self::provider_object()
            .ok_or_else(|| "No se encontró una wallet en el navegador".to_string())?;

        let connect = js_sys::Reflect::get(&provider, &JsValue::from_str("connect"))
            .map_err(|_| "La wallet no expone connect()".to_string())?;
        let connect = connect
            .dyn_ref::<js_sys::Function>()
            .ok_or_else(|| "connect no es una función".to_string())?;

        let promise = connect
            .call0(&provider)
            .map_err(|e| format!("Error llamando connect(): {:?}", e))?;
        let promise = promise
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| "connect() no retornó una Promise".to_string())?;

        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| format!("Conexión rechazada: {:?}", e))?;

        log::info!("🔗 [WALLET] Wallet conectada");
        Ok(())
    }
}

impl WalletProvider for InjectedWallet {
    fn wallet_id(&self) -> Option<String> {
        let provider = Self::provider_object()?;
        let public_key = js_sys::Reflect::get(&provider, &JsValue::from_str("publicKey")).ok()?;
        if public_key.is_undefined() || public_key.is_null() {
            return None;
        }

        let to_string = js_sys::Reflect::get(&public_key, &JsValue::from_str("toString")).ok()?;
        let to_string = to_string.dyn_ref::<js_sys::Function>()?;
        to_string.call0(&public_key).ok()?.as_string()
    }
}

/// Balance de la wallet vía JSON-RPC
pub struct RpcBalanceProvider {
    client: RpcClient,
    wallet: Rc<dyn WalletProvider>,
    balance: Cell<f64>,
    loading: Cell<bool>,
}

impl RpcBalanceProvider {
    pub fn new(rpc_url: &str, wallet: Rc<dyn WalletProvider>) -> Self {
        Self {
            client: RpcClient::new(rpc_url),
            wallet,
            balance: Cell::new(0.0),
            loading: Cell::new(false),
        }
    }
}

#[async_trait(?Send)]
impl BalanceProvider for RpcBalanceProvider {
    fn balance(&self) -> f64 {
        self.balance.get()
    }

    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    async fn refetch(&self) -> Result<(), String> {
        let wallet_id = match self.wallet.wallet_id() {
            Some(id) => id,
            None => {
                self.balance.set(0.0);
                return Ok(());
            }
        };

        self.loading.set(true);
        let result = self.client.get_balance(&wallet_id).await;
        self.loading.set(false);

        let lamports = result?;
        self.balance.set(lamports_to_sol(lamports));
        log::info!("💰 [BALANCE] {} lamports", lamports);
        Ok(())
    }
}

/// Reloj del sistema
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Liquidación simulada: latencia fija, siempre exitosa
pub struct SimulatedSettlement {
    latency_ms: u32,
}

impl SimulatedSettlement {
    pub fn new(latency_ms: u32) -> Self {
        Self { latency_ms }
    }
}

#[async_trait(?Send)]
impl SettlementGateway for SimulatedSettlement {
    async fn settle(&self, action: ActionKind) -> Result<(), String> {
        log::info!("⏳ [SETTLE] Simulando liquidación de {} ({} ms)", action, self.latency_ms);
        TimeoutFuture::new(self.latency_ms).await;
        Ok(())
    }
}
