// ============================================================================
// STAKING PANEL - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Máquina de estados de staking
// - Providers: Wallet, balance, reloj y liquidación simulada
// - Services: RPC y timers del panel
// - State: Rc<RefCell> + subscribers
// - Models: Sesión, cooldown, montos
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod state;
pub mod viewmodels;
mod dom;
mod views;
mod app;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;

// Panel montado actualmente (uno por página)
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    log::info!("🚀 Staking Panel - Rust Puro + MVVM");

    mount_panel()
}

/// Montar el panel (no-op si ya está montado)
#[wasm_bindgen]
pub fn mount_panel() -> Result<(), JsValue> {
    let already_mounted = APP.with(|cell| cell.borrow().is_some());
    if already_mounted {
        log::warn!("⚠️ [APP] El panel ya está montado");
        return Ok(());
    }

    let app = App::mount(&CONFIG)?;
    app.render()?;
    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });
    Ok(())
}

/// Desmontar el panel: cancela los timers y destruye la sesión
#[wasm_bindgen]
pub fn unmount_panel() {
    let app = APP.with(|cell| cell.borrow_mut().take());
    if let Some(mut app) = app {
        app.unmount();
    }
}

/// Re-render del panel montado
pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(ref app) = *cell.borrow() {
            if let Err(e) = app.render() {
                log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
            }
        }
    });
}
