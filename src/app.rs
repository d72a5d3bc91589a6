// ============================================================================
// APP - Monta/desmonta el panel de staking
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

use crate::config::PanelConfig;
use crate::dom::{append_child, document, get_element_by_id, set_inner_html};
use crate::providers::{InjectedWallet, RpcBalanceProvider, SimulatedSettlement, SystemClock, WalletProvider};
use crate::services::PanelTimers;
use crate::viewmodels::{PanelProviders, StakingViewModel};
use crate::views::{render_staking_panel, PanelHandles, STAKE_INPUT_ID};

/// Panel montado: dueño de la sesión y de sus timers
pub struct App {
    root: Element,
    handles: PanelHandles,
    timers: Option<PanelTimers>,
}

impl App {
    /// Montar el panel en `#app`
    pub fn mount(config: &PanelConfig) -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let wallet = InjectedWallet::new();
        let wallet_provider: Rc<dyn WalletProvider> = Rc::new(wallet.clone());
        let providers = PanelProviders {
            wallet: wallet_provider.clone(),
            balance: Rc::new(RpcBalanceProvider::new(&config.rpc_url, wallet_provider)),
            clock: Rc::new(SystemClock),
            settlement: Rc::new(SimulatedSettlement::new(config.timers.settlement_latency_ms)),
        };

        let viewmodel = Rc::new(StakingViewModel::new(providers, config));
        let timers = PanelTimers::start(viewmodel.clone(), &config.timers);

        // Re-render batcheado en el próximo turno del event loop
        viewmodel.state().subscribe(move || {
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        // Balance inicial si la wallet ya estaba autorizada
        {
            let viewmodel = viewmodel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                viewmodel.refresh_balance().await;
            });
        }

        log::info!("🚀 [APP] Panel montado (red: {})", config.network_label);

        Ok(Self {
            root,
            handles: PanelHandles {
                viewmodel,
                wallet,
                network_label: config.network_label.clone(),
            },
            timers: Some(timers),
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.timers.is_some()
    }

    /// Re-render completo preservando el foco del input de stake
    pub fn render(&self) -> Result<(), JsValue> {
        if !self.is_mounted() {
            return Ok(());
        }

        let caret = focused_stake_input().map(|input| input.selection_start().ok().flatten());

        set_inner_html(&self.root, "");
        let panel = render_staking_panel(&self.handles)?;
        append_child(&self.root, &panel)?;

        if let Some(caret) = caret {
            restore_stake_input_focus(caret);
        }
        Ok(())
    }

    /// Desmontar: cancela timers y limpia el DOM
    pub fn unmount(&mut self) {
        if self.timers.take().is_some() {
            set_inner_html(&self.root, "");
            log::info!("👋 [APP] Panel desmontado");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn focused_stake_input() -> Option<HtmlInputElement> {
    let active = document()?.active_element()?;
    if active.id() != STAKE_INPUT_ID {
        return None;
    }
    active.dyn_into::<HtmlInputElement>().ok()
}

fn restore_stake_input_focus(caret: Option<u32>) {
    let input = get_element_by_id(STAKE_INPUT_ID).and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    if let Some(input) = input {
        let _ = input.focus();
        if let Some(position) = caret {
            // type="number" no soporta selection range: ignorar el error
            let _ = input.set_selection_range(position, position);
        }
    }
}
