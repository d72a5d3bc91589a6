// ============================================================================
// COOLDOWN - Cálculo puro del tiempo restante hasta la próxima acción
// ============================================================================
// Siempre se deriva del timestamp absoluto de la última acción: el tick de 1s
// solo recalcula, nunca decrementa un contador propio.
// ============================================================================

use serde::{Deserialize, Serialize};

/// Periodo de cooldown por defecto (24 horas)
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 86_400;

/// Segundos restantes de cooldown: `max(period - (now - last_action), 0)`
pub fn cooldown_remaining(now: i64, last_action_timestamp: i64, period: i64) -> i64 {
    let elapsed = now.saturating_sub(last_action_timestamp);
    period.saturating_sub(elapsed).clamp(0, period.max(0))
}

/// Estado del cooldown producido por cada tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownStatus {
    pub remaining: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub can_perform_action: bool,
}

impl CooldownStatus {
    pub fn compute(now: i64, last_action_timestamp: i64, period: i64) -> Self {
        Self::from_remaining(cooldown_remaining(now, last_action_timestamp, period))
    }

    pub fn from_remaining(remaining: i64) -> Self {
        let remaining = remaining.max(0);
        Self {
            remaining,
            hours: remaining / 3600,
            minutes: (remaining % 3600) / 60,
            seconds: remaining % 60,
            can_perform_action: remaining == 0,
        }
    }

    /// Formato `HH:MM:SS`
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl Default for CooldownStatus {
    fn default() -> Self {
        Self::from_remaining(0)
    }
}
