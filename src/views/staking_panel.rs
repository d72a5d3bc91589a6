// ============================================================================
// STAKING PANEL VIEW - Renderiza el panel (sin lógica de negocio)
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{on_click, on_input_value, ElementBuilder};
use crate::models::{format_amount, short_wallet_id, StakingSession};
use crate::providers::InjectedWallet;
use crate::viewmodels::{PanelControls, StakingViewModel};

pub const STAKE_INPUT_ID: &str = "stake-amount-input";

/// Lo que necesita la vista para enganchar los eventos
#[derive(Clone)]
pub struct PanelHandles {
    pub viewmodel: Rc<StakingViewModel>,
    pub wallet: InjectedWallet,
    pub network_label: String,
}

pub fn render_staking_panel(handles: &PanelHandles) -> Result<Element, JsValue> {
    let session = handles.viewmodel.snapshot();
    let controls = handles.viewmodel.controls();

    let body = if session.is_connected() {
        render_connected(handles, &session, &controls)?
    } else {
        render_disconnected(handles)?
    };

    let card = ElementBuilder::new("div")?
        .class("staking-card")
        .child(
            ElementBuilder::new("div")?
                .class("staking-card__content")
                .child(ElementBuilder::new("h2")?.class("staking-card__title").text("SOL Staking").build())?
                .child(body)?
                .build(),
        )?
        .child_opt(render_error_banner(&session)?)?
        .build();

    Ok(ElementBuilder::new("div")?.class("staking-panel").child(card)?.build())
}

fn render_disconnected(handles: &PanelHandles) -> Result<Element, JsValue> {
    let connect = ElementBuilder::new("button")?
        .class("btn btn--wallet")
        .text("Select Wallet")
        .build();
    {
        let wallet = handles.wallet.clone();
        let viewmodel = handles.viewmodel.clone();
        on_click(&connect, move |_| {
            let wallet = wallet.clone();
            let viewmodel = viewmodel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match wallet.request_connect().await {
                    Ok(()) => {
                        viewmodel.tick_cooldown();
                        viewmodel.refresh_balance().await;
                    }
                    Err(e) => log::warn!("⚠️ [WALLET] {}", e),
                }
            });
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("staking-card__section")
        .child(connect)?
        .child(
            ElementBuilder::new("p")?
                .class("staking-card__hint")
                .text("Connect your wallet to start staking")
                .build(),
        )?
        .build())
}

fn render_connected(
    handles: &PanelHandles,
    session: &StakingSession,
    controls: &PanelControls,
) -> Result<Element, JsValue> {
    let stats = ElementBuilder::new("div")?
        .class("staking-stats")
        .child(ElementBuilder::new("h3")?.text("Protocol Stats").build())?
        .child(stat_row("Total Value Locked:", &format!("{} SOL", format_amount(session.total_value_locked)))?)?
        .child(stat_row("Next Action In:", &session.cooldown.formatted())?)?
        .build();

    // Balance + refresh
    let refresh = ElementBuilder::new("button")?
        .class(if session.balance_loading { "btn-icon btn-icon--spinning" } else { "btn-icon" })
        .attr("title", "Refresh balance")?
        .text("⟳")
        .disabled(!controls.refresh_enabled)?
        .build();
    {
        let viewmodel = handles.viewmodel.clone();
        on_click(&refresh, move |_| {
            let viewmodel = viewmodel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                viewmodel.refresh_balance().await;
            });
        })?;
    }
    let balance = ElementBuilder::new("div")?
        .child(ElementBuilder::new("h3")?.text("Your Balance").build())?
        .child(
            ElementBuilder::new("div")?
                .class("staking-value")
                .child(ElementBuilder::new("span")?.text(&format!("{} SOL", format_amount(session.balance))).build())?
                .child(refresh)?
                .build(),
        )?
        .build();

    // Input de stake
    let input = ElementBuilder::new("input")?
        .class("staking-input")
        .attr("id", STAKE_INPUT_ID)?
        .attr("type", "number")?
        .attr("value", &session.stake_input)?
        .build();
    {
        let viewmodel = handles.viewmodel.clone();
        on_input_value(&input, move |value| viewmodel.set_stake_input(&value))?;
    }

    let stake = ElementBuilder::new("button")?
        .class("btn btn--primary")
        .text(if session.action_in_flight() { "Processing..." } else { "Stake SOL" })
        .disabled(!controls.stake_enabled)?
        .build();
    {
        let viewmodel = handles.viewmodel.clone();
        on_click(&stake, move |_| {
            let viewmodel = viewmodel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let _ = viewmodel.stake_current_input().await;
            });
        })?;
    }

    let compound = action_button("Compound", controls.compound_enabled)?;
    {
        let viewmodel = handles.viewmodel.clone();
        on_click(&compound, move |_| {
            let viewmodel = viewmodel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let _ = viewmodel.compound().await;
            });
        })?;
    }

    let claim = action_button("Claim", controls.claim_enabled)?;
    {
        let viewmodel = handles.viewmodel.clone();
        on_click(&claim, move |_| {
            let viewmodel = viewmodel.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let _ = viewmodel.claim().await;
            });
        })?;
    }

    let wallet_id = session.wallet_id.as_deref().unwrap_or_default();
    let footer = ElementBuilder::new("div")?
        .class("staking-footer")
        .child(ElementBuilder::new("p")?.text(&format!("Connected to: {}", short_wallet_id(wallet_id))).build())?
        .child(ElementBuilder::new("p")?.text(&format!("Network: {}", handles.network_label)).build())?
        .child(ElementBuilder::new("p")?.text(&format!("Compound Streak: {}", session.compound_streak)).build())?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("staking-card__section")
        .child(stats)?
        .child(balance)?
        .child(
            ElementBuilder::new("div")?
                .child(ElementBuilder::new("h3")?.text("Stake Amount (SOL)").build())?
                .child(input)?
                .build(),
        )?
        .child(stake)?
        .child(labeled_value("Staked Amount", &format!("{} SOL", format_amount(session.staked_amount)))?)?
        .child(labeled_value("Current Rewards", &format!("{} SOL", format_amount(session.pending_reward)))?)?
        .child(
            ElementBuilder::new("div")?
                .class("staking-actions")
                .child(compound)?
                .child(claim)?
                .build(),
        )?
        .child(footer)?
        .build())
}

fn render_error_banner(session: &StakingSession) -> Result<Option<Element>, JsValue> {
    match &session.last_error {
        Some(message) => Ok(Some(
            ElementBuilder::new("div")?
                .class("staking-error")
                .text(&format!("⚠ {}", message))
                .build(),
        )),
        None => Ok(None),
    }
}

fn stat_row(label: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("staking-stats__row")
        .child(ElementBuilder::new("span")?.text(label).build())?
        .child(ElementBuilder::new("span")?.class("staking-stats__value").text(value).build())?
        .build())
}

fn labeled_value(label: &str, value: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .child(ElementBuilder::new("h3")?.text(label).build())?
        .child(ElementBuilder::new("div")?.class("staking-value").text(value).build())?
        .build())
}

fn action_button(label: &str, enabled: bool) -> Result<Element, JsValue> {
    ElementBuilder::new("button")?
        .class(if enabled { "btn btn--secondary" } else { "btn btn--secondary btn--disabled" })
        .text(label)
        .disabled(!enabled)
        .map(ElementBuilder::build)
}
