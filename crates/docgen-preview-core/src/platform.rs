//! Platform abstraction traits for preview operations.
//!
//! These traits define the interface between the synchronization logic and
//! the page it runs in. The browser crate implements them over the DOM and
//! Quill; the in-memory versions here back tests and non-browser callers.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use smol_str::SmolStr;

use crate::format::{EMPTY_EDITOR_HTML, NodeContent};

/// Current state of one form control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// Set once the user has fired an input or change event on the control.
    pub edited: bool,
}

/// Read access to the named controls of one form.
pub trait FormSource {
    /// State of the input or textarea named `name`, or `None` if the form has no such control.
    fn field(&self, name: &str) -> Option<FieldState>;
}

/// Write access to the nodes of one preview.
pub trait PreviewSink {
    /// Replace the node's content entirely. A missing node is skipped silently.
    fn write(&mut self, node_id: &str, content: &NodeContent);
}

/// The consumed contract of a third-party rich-text editor instance.
///
/// Methods take `&self`: editor instances are shared handles whose state
/// lives on the page, not in the Rust value.
pub trait RichTextHost {
    /// Current document as HTML.
    fn content_html(&self) -> String;

    /// Current document as plain text.
    fn content_text(&self) -> String;

    /// Replace the document with `html`.
    fn set_content(&self, html: &str);

    /// Call `listener` after every content change.
    fn on_content_changed(&self, listener: Box<dyn FnMut()>);
}

/// Write access to form fields for the submission bridge.
pub trait SubmissionTarget {
    /// Set the hidden input `name`, creating it on first use.
    fn ensure_hidden(&mut self, name: &str, value: &str);

    /// Overwrite the control `name` if the form has one. Returns whether it existed.
    fn overwrite_if_present(&mut self, name: &str, value: &str) -> bool;
}

/// In-memory form.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: BTreeMap<SmolStr, FieldState>,
    hidden: BTreeMap<SmolStr, String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control with a server-provided value. Not marked as edited.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(
            SmolStr::new(name),
            FieldState {
                value: value.to_string(),
                edited: false,
            },
        );
        self
    }

    /// Simulate the user typing into a control, creating it if needed.
    pub fn set_value(&mut self, name: &str, value: &str) {
        let field = self.fields.entry(SmolStr::new(name)).or_default();
        field.value = value.to_string();
        field.edited = true;
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|f| f.value.as_str())
    }

    pub fn hidden_value(&self, name: &str) -> Option<&str> {
        self.hidden.get(name).map(String::as_str)
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }
}

impl FormSource for MemoryForm {
    fn field(&self, name: &str) -> Option<FieldState> {
        self.fields.get(name).cloned()
    }
}

impl SubmissionTarget for MemoryForm {
    fn ensure_hidden(&mut self, name: &str, value: &str) {
        self.hidden.insert(SmolStr::new(name), value.to_string());
    }

    fn overwrite_if_present(&mut self, name: &str, value: &str) -> bool {
        match self.fields.get_mut(name) {
            Some(field) => {
                field.value = value.to_string();
                true
            }
            None => false,
        }
    }
}

/// In-memory preview: node id to last written content.
///
/// Only nodes created up front exist, so writes to unknown ids are dropped
/// the way a missing DOM node would be.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreview {
    nodes: HashMap<SmolStr, Option<NodeContent>>,
    writes: usize,
}

impl MemoryPreview {
    /// A preview with the given node ids and no content yet.
    pub fn with_nodes<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            nodes: ids
                .into_iter()
                .map(|id| (SmolStr::new(id), None))
                .collect(),
            writes: 0,
        }
    }

    pub fn content(&self, node_id: &str) -> Option<&NodeContent> {
        self.nodes.get(node_id).and_then(Option::as_ref)
    }

    /// Shortcut for the raw string of a node.
    pub fn text(&self, node_id: &str) -> Option<&str> {
        self.content(node_id).map(NodeContent::as_str)
    }

    /// Number of writes that hit an existing node.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PreviewSink for MemoryPreview {
    fn write(&mut self, node_id: &str, content: &NodeContent) {
        if let Some(slot) = self.nodes.get_mut(node_id) {
            *slot = Some(content.clone());
            self.writes += 1;
        }
    }
}

#[derive(Default)]
struct MemorySessionState {
    html: String,
    listeners: Vec<Box<dyn FnMut()>>,
}

/// In-memory rich-text session. Clones share the same document.
#[derive(Clone, Default)]
pub struct MemorySession {
    state: Rc<RefCell<MemorySessionState>>,
}

impl MemorySession {
    /// A session holding the editor's empty document.
    pub fn new() -> Self {
        Self::with_html(EMPTY_EDITOR_HTML)
    }

    pub fn with_html(html: &str) -> Self {
        let session = Self::default();
        session.state.borrow_mut().html = html.to_string();
        session
    }
}

impl std::fmt::Debug for MemorySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemorySession")
            .field("html", &state.html)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl RichTextHost for MemorySession {
    fn content_html(&self) -> String {
        self.state.borrow().html.clone()
    }

    fn content_text(&self) -> String {
        // Quill's getText() always ends with a newline.
        let mut text = html_to_text(&self.state.borrow().html);
        text.push('\n');
        text
    }

    fn set_content(&self, html: &str) {
        self.state.borrow_mut().html = html.to_string();

        // Listeners may read the session, so release the borrow while they run.
        let mut listeners = std::mem::take(&mut self.state.borrow_mut().listeners);
        for listener in listeners.iter_mut() {
            listener();
        }
        let mut state = self.state.borrow_mut();
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
    }

    fn on_content_changed(&self, listener: Box<dyn FnMut()>) {
        self.state.borrow_mut().listeners.push(listener);
    }
}

/// Plain-text view of `MemorySession` markup, approximating Quill's `getText()`.
///
/// Only for the in-memory session: tags are stripped, closing block tags and
/// `<br>` become newlines, and only the five basic entities are decoded.
/// The browser session asks Quill itself.
fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut tag = String::new();
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                tag.clear();
            }
            '>' if in_tag => {
                in_tag = false;
                let name = tag.trim_start_matches('/');
                let name = name.split_whitespace().next().unwrap_or_default();
                let name = name.trim_end_matches('/');
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let closes_block = tag.starts_with('/')
                    && matches!(
                        name,
                        "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "li" | "blockquote" | "pre"
                    );
                if closes_block && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            c if in_tag => tag.push(c),
            c => out.push(c),
        }
    }
    let text = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&");
    text.trim_end_matches('\n').to_string()
}
