// ============================================================================
// PANEL TIMERS - Ticks periódicos de cooldown y acumulación
// ============================================================================
// Dos Interval independientes creados al montar el panel. Al hacer drop de
// PanelTimers ambos se cancelan (gloo cancela el Interval en su Drop), así
// ningún tick actúa sobre una sesión destruida.
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Interval;

use crate::config::TimerConfig;
use crate::viewmodels::StakingViewModel;

/// Intervalos propios de un panel montado
pub struct PanelTimers {
    _cooldown: Interval,
    _accrual: Interval,
}

impl PanelTimers {
    pub fn start(viewmodel: Rc<StakingViewModel>, timers: &TimerConfig) -> Self {
        log::info!(
            "⏰ [TIMERS] Cooldown cada {} ms, rewards cada {} ms",
            timers.cooldown_tick_ms,
            timers.accrual_interval_ms
        );

        let cooldown = {
            let viewmodel = viewmodel.clone();
            Interval::new(timers.cooldown_tick_ms, move || {
                // Wallet nueva (o desconectada): pedir su balance
                if viewmodel.tick_cooldown() {
                    let viewmodel = viewmodel.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        viewmodel.refresh_balance().await;
                    });
                }
            })
        };

        let accrual = Interval::new(timers.accrual_interval_ms, move || {
            viewmodel.tick_accrual();
        });

        Self {
            _cooldown: cooldown,
            _accrual: accrual,
        }
    }
}

impl Drop for PanelTimers {
    fn drop(&mut self) {
        log::info!("🛑 [TIMERS] Intervalos cancelados");
    }
}
