//! Generic form UX that ships alongside the preview: required-field checks
//! on submit, JSON cues on blur, and auto-dismissal of flash messages.

use docgen_preview_core::{
    INVALID_BORDER, JSON_FIELDS, JsonLint, PreviewConfig, PreviewError, REQUIRED_FIELDS_MESSAGE,
    lint_json, missing_required,
};
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlFormElement, HtmlTextAreaElement};

use crate::dom::{control_value, js_err};

fn set_border(element: &HtmlElement, color: &str) {
    let style = element.style();
    let result = if color.is_empty() {
        style.remove_property("border-color").map(|_| ())
    } else {
        style.set_property("border-color", color)
    };
    if let Err(e) = result {
        tracing::debug!(error = ?e, "could not set border colour");
    }
}

/// Highlight blank `[required]` controls of `form`.
///
/// Returns whether the form may be submitted.
pub fn check_required(form: &HtmlFormElement) -> Result<bool, PreviewError> {
    let nodes = form.query_selector_all("[required]").map_err(js_err)?;
    let mut controls = Vec::new();
    for i in 0..nodes.length() {
        let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let value = control_value(&element).unwrap_or_default();
        controls.push((element, value));
    }

    let missing = missing_required(
        controls
            .iter()
            .enumerate()
            .map(|(i, (_, value))| (i, value.as_str())),
    );
    for (i, (element, _)) in controls.iter().enumerate() {
        if missing.contains(&i) {
            set_border(element, INVALID_BORDER);
        } else {
            set_border(element, "");
        }
    }

    Ok(missing.is_empty())
}

/// Block submission of `form` while required controls are blank.
pub fn attach_required_validation(form: &HtmlFormElement) {
    let target = form.clone();
    EventListener::new_with_options(
        form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |evt| match check_required(&target) {
            Ok(true) => {}
            Ok(false) => {
                evt.prevent_default();
                if let Err(e) = gloo_utils::window().alert_with_message(REQUIRED_FIELDS_MESSAGE) {
                    tracing::debug!(error = ?e, "alert failed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "required field check failed"),
        },
    )
    .forget();
}

/// Colour `textarea` by whether its content is well-formed JSON.
pub fn lint_json_field(textarea: &HtmlTextAreaElement) -> JsonLint {
    let lint = lint_json(&textarea.value());
    if let JsonLint::Invalid(message) = &lint {
        tracing::warn!(field = %textarea.name(), %message, "invalid JSON");
    }
    if let Some(color) = lint.border_color() {
        set_border(textarea, color);
    }
    lint
}

/// Lint the JSON textareas of the page on blur.
pub fn attach_json_lint(document: &Document) -> Result<(), PreviewError> {
    let selector = JSON_FIELDS
        .iter()
        .map(|name| format!(r#"textarea[name="{name}"]"#))
        .collect::<Vec<_>>()
        .join(", ");
    let nodes = document.query_selector_all(&selector).map_err(js_err)?;

    for i in 0..nodes.length() {
        let Some(textarea) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlTextAreaElement>().ok())
        else {
            continue;
        };
        let target = textarea.clone();
        EventListener::new(&textarea, "blur", move |_| {
            lint_json_field(&target);
        })
        .forget();
    }
    Ok(())
}

/// Fade out and remove every `.flash-message` after the configured delay.
pub fn schedule_flash_dismissal(
    document: &Document,
    config: &PreviewConfig,
) -> Result<usize, PreviewError> {
    let nodes = document.query_selector_all(".flash-message").map_err(js_err)?;
    let dismiss_ms = config.flash_dismiss_ms;
    let fade_ms = config.flash_fade_ms;

    let mut scheduled = 0;
    for i in 0..nodes.length() {
        let Some(message) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        Timeout::new(dismiss_ms, move || {
            let style = message.style();
            let _ = style.set_property("transition", &format!("opacity {fade_ms}ms"));
            let _ = style.set_property("opacity", "0");
            Timeout::new(fade_ms, move || message.remove()).forget();
        })
        .forget();
        scheduled += 1;
    }
    Ok(scheduled)
}
