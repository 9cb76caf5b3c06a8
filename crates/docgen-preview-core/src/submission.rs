//! Submission bridge: materialize editor content into plain form fields.
//!
//! Runs synchronously from the form's submit handler, before the browser
//! serializes the form, so the server receives both the HTML and the plain
//! text of the document body.

use crate::descriptor::FormDescriptor;
use crate::platform::{RichTextHost, SubmissionTarget};
use crate::session::SessionRegistry;

/// What the bridge did for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Editor content was copied. `text_field_updated` is false when the form
    /// has no plain-text backing field.
    Bridged { text_field_updated: bool },
    /// No editor session; the textarea the user edited is submitted as-is.
    NoSession,
}

/// Copy the form's editor HTML and text into its submission fields.
pub fn prepare_submission<T, H>(
    descriptor: &FormDescriptor,
    target: &mut T,
    sessions: &SessionRegistry<H>,
) -> SubmissionOutcome
where
    T: SubmissionTarget + ?Sized,
    H: RichTextHost,
{
    let Some(session) = sessions.get(descriptor.editor_id) else {
        tracing::debug!(
            form_id = descriptor.form_id,
            "no editor session, submitting textarea as-is"
        );
        return SubmissionOutcome::NoSession;
    };

    let html = session.content_html();
    let text = session.content_text();
    let fields = &descriptor.submission;

    target.ensure_hidden(fields.html_field, &html);
    let text_field_updated = target.overwrite_if_present(fields.text_field, &text);

    tracing::debug!(
        form_id = descriptor.form_id,
        html_len = html.len(),
        text_field_updated,
        "prepared submission"
    );
    SubmissionOutcome::Bridged { text_field_updated }
}
