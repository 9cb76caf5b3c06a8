//! Quill rich-text editor binding.
//!
//! Quill is loaded by the page as a global script. These bindings cover the
//! handful of members the preview needs; `QuillSession` adapts them to the
//! core `RichTextHost` contract.

use docgen_preview_core::{PreviewError, RichTextHost};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::js_err;

#[wasm_bindgen]
extern "C" {
    /// A Quill editor instance.
    #[derive(Debug, Clone)]
    pub type Quill;

    #[wasm_bindgen(constructor, catch)]
    fn new(selector: &str, options: &JsValue) -> Result<Quill, JsValue>;

    /// The contenteditable element holding the document.
    #[wasm_bindgen(method, getter)]
    pub fn root(this: &Quill) -> web_sys::HtmlElement;

    #[wasm_bindgen(method, js_name = getText)]
    pub fn get_text(this: &Quill) -> String;

    #[wasm_bindgen(method)]
    pub fn on(this: &Quill, event: &str, handler: &js_sys::Function);
}

/// Toolbar offered by editors the preview constructs itself.
fn toolbar() -> serde_json::Value {
    serde_json::json!([
        [{ "header": [1, 2, 3, 4, 5, 6, false] }],
        ["bold", "italic", "underline", "strike"],
        [{ "color": [] }, { "background": [] }],
        [{ "list": "ordered" }, { "list": "bullet" }],
        [{ "align": [] }],
        ["link", "image"],
        ["blockquote", "code-block"],
        ["clean"]
    ])
}

fn editor_options(placeholder: &str) -> Result<JsValue, PreviewError> {
    let options = serde_json::json!({
        "theme": "snow",
        "placeholder": placeholder,
        "modules": { "toolbar": toolbar() },
    });
    js_sys::JSON::parse(&options.to_string()).map_err(js_err)
}

/// Whether the Quill script has been loaded.
pub fn quill_available() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("Quill")).unwrap_or(false)
}

/// Live state of one Quill instance.
#[derive(Debug, Clone)]
pub struct QuillSession {
    quill: Quill,
}

impl QuillSession {
    pub fn new(quill: Quill) -> Self {
        Self { quill }
    }

    pub fn quill(&self) -> &Quill {
        &self.quill
    }
}

impl RichTextHost for QuillSession {
    fn content_html(&self) -> String {
        self.quill.root().inner_html()
    }

    fn content_text(&self) -> String {
        self.quill.get_text()
    }

    fn set_content(&self, html: &str) {
        self.quill.root().set_inner_html(html);
    }

    fn on_content_changed(&self, listener: Box<dyn FnMut()>) {
        let closure = Closure::wrap(listener);
        self.quill
            .on("text-change", closure.as_ref().unchecked_ref());
        // Page scoped, like the editor itself.
        closure.forget();
    }
}

/// Construct (or adopt) the Quill editor on `#editor_id`.
///
/// Returns `Ok(None)` when the element is missing or Quill is not loaded;
/// the preview then reads the plain textarea instead.
pub fn init_editor(
    document: &web_sys::Document,
    editor_id: &str,
    placeholder: &str,
) -> Result<Option<QuillSession>, PreviewError> {
    let Some(element) = document.get_element_by_id(editor_id) else {
        tracing::debug!(editor_id, "editor container not on page");
        return Ok(None);
    };
    if !quill_available() {
        tracing::debug!(editor_id, "Quill not loaded, using plain textarea");
        return Ok(None);
    }

    if let Some(existing) = existing_session(&element)? {
        tracing::debug!(editor_id, "adopted existing Quill instance");
        return Ok(Some(existing));
    }

    let options = editor_options(placeholder)?;
    let quill = Quill::new(&format!("#{editor_id}"), &options).map_err(js_err)?;
    tracing::debug!(editor_id, "constructed Quill editor");
    Ok(Some(QuillSession::new(quill)))
}

/// The Quill instance already running on `element`, if any.
///
/// An element counts as initialized when it is a `.ql-container` or holds a
/// `.ql-toolbar`. The instance is read from `__quill` on the element itself
/// or on its closest `.ql-editor`.
pub fn existing_session(element: &Element) -> Result<Option<QuillSession>, PreviewError> {
    let initialized = element.class_list().contains("ql-container")
        || element.query_selector(".ql-toolbar").map_err(js_err)?.is_some();
    if !initialized {
        return Ok(None);
    }

    let mut candidates = vec![element.clone()];
    if let Some(editor) = element.closest(".ql-editor").map_err(js_err)? {
        candidates.push(editor);
    }
    for candidate in candidates {
        let instance =
            js_sys::Reflect::get(&candidate, &JsValue::from_str("__quill")).map_err(js_err)?;
        if !instance.is_undefined() && !instance.is_null() {
            return Ok(Some(QuillSession::new(instance.unchecked_into())));
        }
    }
    Ok(None)
}
