#![cfg(target_arch = "wasm32")]
//! Browser bindings for `multifile`.
//!
//! Loading the module attaches every `.js-field-file-multiple` field on the
//! page once the DOM is ready. Pages with different markup call
//! `attachWithConfig` with a JSON [`WidgetConfig`].

mod dom;
mod wiring;

use multifile::WidgetConfig;
use wasm_bindgen::prelude::*;

pub use dom::{DomFieldView, WebFile};
pub use wiring::attach;

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn attach_defaults() {
    match document() {
        Ok(doc) => {
            if let Err(e) = attach(&doc, WidgetConfig::default()) {
                log::warn!("attach upload fields: {e}");
            }
        }
        Err(e) => web_sys::console::error_1(&e),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    // Better panic messages in the browser console
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let doc = match document() {
        Ok(d) => d,
        Err(e) => {
            web_sys::console::error_1(&e);
            return;
        }
    };

    if doc.ready_state() == "loading" {
        let cb: js_sys::Function = Closure::once_into_js(attach_defaults).unchecked_into();
        if let Err(e) = doc.add_event_listener_with_callback("DOMContentLoaded", &cb) {
            web_sys::console::error_1(&e);
        }
    } else {
        attach_defaults();
    }
}

/// Attach fields described by a JSON [`WidgetConfig`]; missing keys keep their
/// defaults. Returns how many fields were newly attached.
#[wasm_bindgen(js_name = attachWithConfig)]
pub fn attach_with_config(json: &str) -> Result<u32, JsValue> {
    let config: WidgetConfig = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("invalid upload field config: {e}")))?;
    let doc = document()?;
    let added = attach(&doc, config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(added as u32)
}
