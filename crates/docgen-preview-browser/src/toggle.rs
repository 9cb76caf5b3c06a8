//! Collapse/expand of a preview panel.
//!
//! The state lives in the DOM (the content region's `display`), so the
//! toggle needs nothing but the button that was clicked.

use docgen_preview_core::{
    CONTENT_CLASS, PREVIEW_CLASS, PreviewError, PreviewVisibility, TOGGLE_CLASS,
};
use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom::js_err;

/// Flip the panel containing `button`. Returns the new state, or `None` if
/// the button is not inside a preview.
pub fn toggle_preview(button: &Element) -> Result<Option<PreviewVisibility>, PreviewError> {
    let Some(preview) = button
        .closest(&format!(".{PREVIEW_CLASS}"))
        .map_err(js_err)?
    else {
        return Ok(None);
    };
    let Some(content) = preview
        .query_selector(&format!(".{CONTENT_CLASS}"))
        .map_err(js_err)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(None);
    };

    let style = content.style();
    let current = PreviewVisibility::from_display(
        &style.get_property_value("display").map_err(js_err)?,
    );
    let next = current.toggled();
    style.set_property("display", next.display()).map_err(js_err)?;
    button.set_inner_html(&next.button_markup());

    Ok(Some(next))
}

/// Wire the panel's toggle button.
pub fn attach_toggle(preview: &Element) -> Result<(), PreviewError> {
    let Some(button) = preview
        .query_selector(&format!(".{TOGGLE_CLASS}"))
        .map_err(js_err)?
    else {
        return Ok(());
    };

    let target = button.clone();
    EventListener::new(&button, "click", move |_| {
        if let Err(e) = toggle_preview(&target) {
            tracing::warn!(error = %e, "preview toggle failed");
        }
    })
    .forget();
    Ok(())
}
