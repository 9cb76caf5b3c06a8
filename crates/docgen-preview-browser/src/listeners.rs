//! Form event wiring for the synchronizer.
//!
//! Listeners are attached once, when a preview is created, and never
//! removed. Re-initialization relies on `ensure_preview` reporting the
//! existing panel instead of attaching a second set.

use std::rc::Rc;

use docgen_preview_core::PreviewError;
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement};

use crate::dom::{EDITED_ATTR, js_err};

/// Events that count as the user editing a control.
pub const EDIT_EVENTS: [&str; 2] = ["input", "change"];

/// Attach `input`/`change` listeners to every input and textarea of `form`.
///
/// Each event marks its control as edited and then calls `on_edit`.
/// Returns the number of controls wired.
pub fn attach_field_listeners(
    form: &HtmlFormElement,
    on_edit: Rc<dyn Fn()>,
) -> Result<u32, PreviewError> {
    let controls = form
        .query_selector_all("input, textarea")
        .map_err(js_err)?;

    for i in 0..controls.length() {
        let Some(control) = controls.item(i) else {
            continue;
        };
        for event in EDIT_EVENTS {
            let on_edit = on_edit.clone();
            EventListener::new(&control, event, move |evt| {
                if let Some(el) = evt.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                    let _ = el.set_attribute(EDITED_ATTR, "true");
                }
                on_edit();
            })
            .forget();
        }
    }

    tracing::debug!(controls = controls.length(), "attached field listeners");
    Ok(controls.length())
}
