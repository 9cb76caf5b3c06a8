//! DOM-backed form source, preview sink and submission target.

use docgen_preview_core::{
    FieldState, FormSource, NodeContent, PreviewError, PreviewSink, SubmissionTarget,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

/// Attribute set on a control once the user has fired input/change on it.
pub const EDITED_ATTR: &str = "data-preview-edited";

/// Convert a thrown JS value into a preview error.
pub(crate) fn js_err(value: JsValue) -> PreviewError {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    PreviewError::Dom(message)
}

/// Value of an input, textarea or select element.
pub fn control_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        return Some(textarea.value());
    }
    element
        .dyn_ref::<web_sys::HtmlSelectElement>()
        .map(|select| select.value())
}

fn set_control_value(element: &Element, value: &str) -> bool {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
        true
    } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
        textarea.set_value(value);
        true
    } else {
        false
    }
}

/// A `<form>` on the page, read and written through its named controls.
#[derive(Debug, Clone)]
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    /// Find a form by id. `None` if absent or not a `<form>`.
    pub fn by_id(document: &Document, form_id: &str) -> Option<Self> {
        document
            .get_element_by_id(form_id)?
            .dyn_into::<HtmlFormElement>()
            .ok()
            .map(Self::new)
    }

    pub fn element(&self) -> &HtmlFormElement {
        &self.form
    }

    fn query(&self, selector: &str) -> Option<Element> {
        match self.form.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(selector, error = ?e, "invalid selector");
                None
            }
        }
    }

    /// First input or textarea named `name`.
    pub fn control(&self, name: &str) -> Option<Element> {
        self.query(&format!(
            r#"input[name="{name}"], textarea[name="{name}"]"#
        ))
    }
}

impl FormSource for DomForm {
    fn field(&self, name: &str) -> Option<FieldState> {
        let control = self.control(name)?;
        Some(FieldState {
            value: control_value(&control)?,
            edited: control.has_attribute(EDITED_ATTR),
        })
    }
}

impl SubmissionTarget for DomForm {
    fn ensure_hidden(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.query(&format!(r#"input[name="{name}"]"#)) {
            set_control_value(&existing, value);
            return;
        }

        let Some(document) = self.form.owner_document() else {
            return;
        };
        let created = document
            .create_element("input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().map_err(JsValue::from))
            .and_then(|input| {
                input.set_type("hidden");
                input.set_name(name);
                input.set_value(value);
                self.form.append_child(&input).map(|_| ())
            });
        if let Err(e) = created {
            tracing::warn!(name, error = %js_err(e), "could not create hidden field");
        }
    }

    fn overwrite_if_present(&mut self, name: &str, value: &str) -> bool {
        self.query(&format!(r#"textarea[name="{name}"]"#))
            .is_some_and(|textarea| set_control_value(&textarea, value))
    }
}

/// Preview nodes looked up by id in the page document.
#[derive(Debug, Clone)]
pub struct DomPreview {
    document: Document,
}

impl DomPreview {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PreviewSink for DomPreview {
    fn write(&mut self, node_id: &str, content: &NodeContent) {
        let Some(node) = self.document.get_element_by_id(node_id) else {
            return;
        };
        match content {
            NodeContent::Text(text) => node.set_text_content(Some(text.as_str())),
            NodeContent::Markup(html) => node.set_inner_html(html),
        }
    }
}
