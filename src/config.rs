use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_COOLDOWN_SECONDS;

/// Configuración del panel de staking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    pub rpc_url: String,
    pub network_label: String,
    pub enable_logging: bool,
    pub timers: TimerConfig,
    pub rewards: RewardConfig,
    pub initial_stake_input: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            network_label: "Devnet".to_string(),
            enable_logging: true,
            timers: TimerConfig::default(),
            rewards: RewardConfig::default(),
            initial_stake_input: "0.7".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    pub cooldown_seconds: i64,
    pub cooldown_tick_ms: u32,
    pub accrual_interval_ms: u32,
    pub settlement_latency_ms: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            cooldown_tick_ms: 1_000,
            accrual_interval_ms: 5_000,
            settlement_latency_ms: 1_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    pub accrual_quantum: f64,
    pub initial_pending_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            accrual_quantum: 0.001,
            initial_pending_reward: 0.07,
        }
    }
}

impl PanelConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: option_env!("SOLANA_RPC_URL")
                .map(str::to_string)
                .unwrap_or(defaults.rpc_url),
            network_label: option_env!("NETWORK_LABEL")
                .map(str::to_string)
                .unwrap_or(defaults.network_label),
            enable_logging: option_env!("ENABLE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            timers: TimerConfig {
                cooldown_seconds: option_env!("COOLDOWN_SECONDS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timers.cooldown_seconds),
                cooldown_tick_ms: option_env!("COOLDOWN_TICK_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timers.cooldown_tick_ms),
                accrual_interval_ms: option_env!("ACCRUAL_INTERVAL_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timers.accrual_interval_ms),
                settlement_latency_ms: option_env!("SETTLEMENT_LATENCY_MS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.timers.settlement_latency_ms),
            },
            rewards: RewardConfig {
                accrual_quantum: non_negative_or(
                    option_env!("ACCRUAL_QUANTUM"),
                    defaults.rewards.accrual_quantum,
                ),
                initial_pending_reward: non_negative_or(
                    option_env!("INITIAL_PENDING_REWARD"),
                    defaults.rewards.initial_pending_reward,
                ),
            },
            initial_stake_input: option_env!("INITIAL_STAKE_INPUT")
                .map(str::to_string)
                .unwrap_or(defaults.initial_stake_input),
        }
    }

    /// Nivel de log según configuración
    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Info
        } else {
            log::Level::Warn
        }
    }
}

/// Montos de reward: un valor negativo o inválido cae al default
fn non_negative_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: PanelConfig = PanelConfig::from_env();
}
