//! PageController - the page-level entry point for JavaScript.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use smol_str::SmolStr;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlFormElement};

use docgen_preview_browser::{
    DomForm, DomPreview, FormDescriptor, PreviewConfig, PreviewError, PreviewStatus,
    PreviewVisibility, Quill, QuillSession, RichTextHost, SessionRegistry, SubmissionOutcome,
    all_descriptors, attach_field_listeners, attach_json_lint, attach_required_validation,
    attach_toggle, descriptor_for_editor, descriptor_for_form, ensure_preview, init_editor,
    prepare_submission, schedule_flash_dismissal, sync_preview, toggle_preview,
};

use crate::logging::init_logging;

/// Page-scoped state shared with event closures.
struct PageState {
    config: PreviewConfig,
    sessions: SessionRegistry<QuillSession>,
    /// Editors whose text-change listener is attached.
    editor_listeners: HashSet<SmolStr>,
    /// Forms whose submit handler runs the submission bridge.
    bridged_forms: HashSet<SmolStr>,
    /// Synchronization passes run so far.
    sync_passes: Cell<u64>,
}

/// Live preview controller for one page.
///
/// Owns the editor session registry. Event handlers hold weak references
/// to the same state, so they go quiet if the controller is dropped.
#[wasm_bindgen]
pub struct PageController {
    state: Rc<RefCell<PageState>>,
    document: Document,
}

#[wasm_bindgen]
impl PageController {
    /// Create a controller. `config` may be omitted, or an object with any
    /// of the `PreviewConfig` keys.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PageController, JsError> {
        let config: PreviewConfig = if config.is_undefined() || config.is_null() {
            PreviewConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?
        };
        config.validate().map_err(PreviewError::from)?;
        init_logging(config.log_level());

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsError::new("no document available"))?;

        Ok(Self {
            state: Rc::new(RefCell::new(PageState {
                config,
                sessions: SessionRegistry::new(),
                editor_listeners: HashSet::new(),
                bridged_forms: HashSet::new(),
                sync_passes: Cell::new(0),
            })),
            document,
        })
    }

    /// Page load: wire form validation and flash messages, then create a
    /// preview for every form already on the page.
    pub fn init(&self) -> Result<(), JsError> {
        let config = self.state.borrow().config.clone();

        // Submit listeners run in registration order, and validation reads the
        // body fields the bridge fills, so the bridge goes first.
        for descriptor in all_descriptors() {
            if let Some(form) = DomForm::by_id(&self.document, descriptor.form_id) {
                attach_submission_bridge(&self.state, &self.document, &form, descriptor);
            }
        }

        if config.validate_forms {
            let forms = self.document.query_selector_all("form").map_err(js_error)?;
            for i in 0..forms.length() {
                let form = forms.item(i).and_then(|n| n.dyn_into::<HtmlFormElement>().ok());
                if let Some(form) = form {
                    attach_required_validation(&form);
                }
            }
        }
        if config.lint_json {
            attach_json_lint(&self.document)?;
        }
        let flashes = schedule_flash_dismissal(&self.document, &config)?;

        for descriptor in all_descriptors() {
            if let Err(e) = initialize_form(&self.state, &self.document, descriptor) {
                tracing::warn!(form_id = descriptor.form_id, error = %e, "preview init failed");
            }
        }

        tracing::debug!(flashes, "page initialized");
        Ok(())
    }

    /// Post-display hook: call after a form has been made visible.
    ///
    /// Constructs the form's rich-text editor if Quill is loaded and nobody
    /// registered one yet, then ensures the preview exists and is current.
    #[wasm_bindgen(js_name = formShown)]
    pub fn form_shown(&self, form_id: &str) -> Result<(), JsError> {
        let descriptor = lookup_form(form_id)?;

        if !self.state.borrow().sessions.contains(descriptor.editor_id) {
            let placeholder = self.state.borrow().config.editor_placeholder.clone();
            match init_editor(&self.document, descriptor.editor_id, &placeholder) {
                Ok(Some(session)) => {
                    register_session(&self.state, &self.document, descriptor, session);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(editor_id = descriptor.editor_id, error = %e, "editor init failed");
                }
            }
        }

        initialize_form(&self.state, &self.document, descriptor)?;
        Ok(())
    }

    /// Readiness callback for editors constructed by page code.
    #[wasm_bindgen(js_name = registerEditor)]
    pub fn register_editor(&self, editor_id: &str, quill: Quill) -> Result<(), JsError> {
        let descriptor = descriptor_for_editor(editor_id)
            .ok_or_else(|| PreviewError::UnknownEditor(editor_id.to_string()))?;
        register_session(&self.state, &self.document, descriptor, QuillSession::new(quill));
        sync_form(&self.state, &self.document, descriptor);
        Ok(())
    }

    /// Run one synchronization pass for `form_id`.
    #[wasm_bindgen(js_name = syncForm)]
    pub fn sync_form(&self, form_id: &str) -> Result<(), JsError> {
        let descriptor = lookup_form(form_id)?;
        sync_form(&self.state, &self.document, descriptor);
        Ok(())
    }

    /// Copy editor content into the form's submission fields.
    ///
    /// Runs automatically on submit of initialized forms. Returns whether an
    /// editor session was bridged.
    #[wasm_bindgen(js_name = prepareSubmission)]
    pub fn prepare_submission(&self, form_id: &str) -> Result<bool, JsError> {
        let descriptor = lookup_form(form_id)?;
        let outcome = bridge_submission(&self.state, &self.document, descriptor);
        Ok(matches!(outcome, Some(SubmissionOutcome::Bridged { .. })))
    }

    /// Flip the preview panel containing `button`. Returns whether the panel
    /// is now expanded, or `undefined` if the button is not in a preview.
    #[wasm_bindgen(js_name = togglePreview)]
    pub fn toggle_preview(&self, button: &Element) -> Result<Option<bool>, JsError> {
        let next = toggle_preview(button)?;
        Ok(next.map(PreviewVisibility::is_expanded))
    }

    #[wasm_bindgen(js_name = getContentHtml)]
    pub fn content_html(&self, editor_id: &str) -> Option<String> {
        self.state
            .borrow()
            .sessions
            .get(editor_id)
            .map(RichTextHost::content_html)
    }

    #[wasm_bindgen(js_name = getContentText)]
    pub fn content_text(&self, editor_id: &str) -> Option<String> {
        self.state
            .borrow()
            .sessions
            .get(editor_id)
            .map(RichTextHost::content_text)
    }

    /// Replace an editor's document and resynchronize its preview.
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&self, editor_id: &str, html: &str) -> Result<(), JsError> {
        let session = self
            .state
            .borrow()
            .sessions
            .get(editor_id)
            .cloned()
            .ok_or_else(|| PreviewError::UnknownEditor(editor_id.to_string()))?;
        session.set_content(html);

        if let Some(descriptor) = descriptor_for_editor(editor_id) {
            sync_form(&self.state, &self.document, descriptor);
        }
        Ok(())
    }
}

fn js_error(value: JsValue) -> JsError {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value));
    JsError::new(&message)
}

fn lookup_form(form_id: &str) -> Result<&'static FormDescriptor, PreviewError> {
    descriptor_for_form(form_id).ok_or_else(|| PreviewError::UnknownForm(form_id.to_string()))
}

/// Create the form's preview if needed and bring it up to date.
///
/// Listeners are attached only when the panel is created here, so repeated
/// calls never stack handlers.
fn initialize_form(
    state: &Rc<RefCell<PageState>>,
    document: &Document,
    descriptor: &'static FormDescriptor,
) -> Result<PreviewStatus, PreviewError> {
    let Some(form) = DomForm::by_id(document, descriptor.form_id) else {
        tracing::debug!(form_id = descriptor.form_id, "form not on page");
        return Ok(PreviewStatus::NotApplicable);
    };

    attach_submission_bridge(state, document, &form, descriptor);

    let visibility = PreviewVisibility::default();
    let status = ensure_preview(document, form.element(), descriptor, visibility)?;
    if matches!(status, PreviewStatus::NotApplicable) {
        return Ok(status);
    }
    if let PreviewStatus::Created(preview) = &status {
        let weak = Rc::downgrade(state);
        let doc = document.clone();
        let on_edit: Rc<dyn Fn()> = Rc::new(move || {
            with_state(&weak, |state| sync_form(state, &doc, descriptor));
        });
        attach_field_listeners(form.element(), on_edit)?;
        attach_toggle(preview)?;
    }

    sync_form(state, document, descriptor);
    Ok(status)
}

/// Add `session` to the registry and subscribe the preview to its changes.
fn register_session(
    state: &Rc<RefCell<PageState>>,
    document: &Document,
    descriptor: &'static FormDescriptor,
    session: QuillSession,
) {
    let editor_id = descriptor.editor_id;
    // The registry keeps the first session; listen on that one.
    let (registered, needs_listener) = {
        let mut state = state.borrow_mut();
        state.sessions.register(editor_id, session);
        let needs_listener = state.editor_listeners.insert(SmolStr::new(editor_id));
        (state.sessions.get(editor_id).cloned(), needs_listener)
    };

    let Some(registered) = registered else {
        return;
    };
    if needs_listener {
        let weak = Rc::downgrade(state);
        let doc = document.clone();
        registered.on_content_changed(Box::new(move || {
            with_state(&weak, |state| sync_form(state, &doc, descriptor));
        }));
    }
}

fn attach_submission_bridge(
    state: &Rc<RefCell<PageState>>,
    document: &Document,
    form: &DomForm,
    descriptor: &'static FormDescriptor,
) {
    if !state
        .borrow_mut()
        .bridged_forms
        .insert(SmolStr::new(descriptor.form_id))
    {
        return;
    }

    let weak = Rc::downgrade(state);
    let doc = document.clone();
    EventListener::new(form.element(), "submit", move |_| {
        with_state(&weak, |state| {
            bridge_submission(state, &doc, descriptor);
        });
    })
    .forget();
}

fn with_state(weak: &Weak<RefCell<PageState>>, f: impl FnOnce(&Rc<RefCell<PageState>>)) {
    if let Some(state) = weak.upgrade() {
        f(&state);
    }
}

fn sync_form(state: &Rc<RefCell<PageState>>, document: &Document, descriptor: &FormDescriptor) {
    let Some(form) = DomForm::by_id(document, descriptor.form_id) else {
        return;
    };
    // A change event fired while the controller holds the state mutably
    // (e.g. during editor registration) will be followed by its own pass.
    let Ok(state) = state.try_borrow() else {
        tracing::debug!(form_id = descriptor.form_id, "state busy, sync skipped");
        return;
    };
    sync_preview(
        descriptor,
        &form,
        &state.sessions,
        &mut DomPreview::new(document.clone()),
    );
    state.sync_passes.set(state.sync_passes.get() + 1);
}

fn bridge_submission(
    state: &Rc<RefCell<PageState>>,
    document: &Document,
    descriptor: &FormDescriptor,
) -> Option<SubmissionOutcome> {
    let mut form = DomForm::by_id(document, descriptor.form_id)?;
    let state = state.try_borrow().ok()?;
    Some(prepare_submission(descriptor, &mut form, &state.sessions))
}

#[cfg(test)]
mod tests;
