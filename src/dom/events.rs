// ============================================================================
// EVENTS - Listeners de click/input para los controles del panel
// ============================================================================
// El panel se re-renderiza con set_inner_html(""): al destruir el elemento el
// navegador suelta sus listeners, por eso closure.forget() no acumula.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, InputEvent, MouseEvent};

pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Input handler que entrega el valor actual del `<input>`
pub fn on_input_value<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    let input = element
        .dyn_ref::<HtmlInputElement>()
        .ok_or_else(|| JsValue::from_str("Element is not an HtmlInputElement"))?
        .clone();

    let closure = Closure::wrap(Box::new(move |_event: InputEvent| {
        handler(input.value());
    }) as Box<dyn FnMut(InputEvent)>);
    element.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
