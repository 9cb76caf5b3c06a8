//! Preview panel creation.
//!
//! Initialization may run speculatively (page load, every form switch,
//! editor readiness), so `ensure_preview` is idempotent: the presence of a
//! preview container in the form group is the only record that a form has
//! been set up.

use docgen_preview_core::{
    FormDescriptor, GROUP_CLASS, PREVIEW_CLASS, PreviewError, PreviewVisibility, render_skeleton,
};
use web_sys::{Document, Element, HtmlFormElement};

use crate::dom::js_err;

/// What `ensure_preview` found or did.
#[derive(Debug, Clone)]
pub enum PreviewStatus {
    /// The form has no editor container inside a form group; nothing to do.
    NotApplicable,
    /// A preview was already there.
    Existing(Element),
    /// A preview was just created. Listeners still need attaching.
    Created(Element),
}

impl PreviewStatus {
    pub fn element(&self) -> Option<&Element> {
        match self {
            PreviewStatus::NotApplicable => None,
            PreviewStatus::Existing(el) | PreviewStatus::Created(el) => Some(el),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, PreviewStatus::Created(_))
    }
}

/// Find the form group holding the descriptor's editor container.
pub fn preview_group(
    form: &HtmlFormElement,
    descriptor: &FormDescriptor,
) -> Result<Option<Element>, PreviewError> {
    let Some(container) = form
        .query_selector(&format!("#{}", descriptor.editor_id))
        .map_err(js_err)?
    else {
        return Ok(None);
    };
    container
        .closest(&format!(".{GROUP_CLASS}"))
        .map_err(js_err)
}

/// Create the preview panel for `descriptor` inside `form` unless it exists.
///
/// The panel is appended to the form group that holds the editor container,
/// after the container. The caller runs the first synchronization pass.
pub fn ensure_preview(
    document: &Document,
    form: &HtmlFormElement,
    descriptor: &FormDescriptor,
    visibility: PreviewVisibility,
) -> Result<PreviewStatus, PreviewError> {
    let Some(group) = preview_group(form, descriptor)? else {
        tracing::debug!(form_id = descriptor.form_id, "no editor group, preview not applicable");
        return Ok(PreviewStatus::NotApplicable);
    };

    if let Some(existing) = group
        .query_selector(&format!(".{PREVIEW_CLASS}"))
        .map_err(js_err)?
    {
        return Ok(PreviewStatus::Existing(existing));
    }

    let preview = document.create_element("div").map_err(js_err)?;
    preview.set_class_name(PREVIEW_CLASS);
    preview.set_attribute("data-form-id", descriptor.form_id).map_err(js_err)?;
    preview.set_inner_html(&render_skeleton(descriptor, visibility));
    group.append_child(&preview).map_err(js_err)?;

    tracing::debug!(form_id = descriptor.form_id, "created preview");
    Ok(PreviewStatus::Created(preview))
}
