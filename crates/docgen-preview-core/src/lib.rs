//! docgen-preview-core: live document preview logic without DOM dependencies.
//!
//! This crate provides:
//! - `FormDescriptor` / `Binding` - static field-to-preview mappings per document type
//! - Formatters for plain text, dates and rich text with their fallback rules
//! - `render_preview` / `sync_preview` - the synchronization pass
//! - `SessionRegistry` - explicit registry of rich-text editor sessions
//! - `prepare_submission` - copies editor content into form fields before submit
//! - Platform traits (`FormSource`, `PreviewSink`, `RichTextHost`, `SubmissionTarget`)
//!   implemented by the browser crate, with in-memory versions for tests

pub mod config;
pub mod descriptor;
pub mod error;
pub mod format;
pub mod platform;
pub mod session;
pub mod submission;
pub mod sync;
pub mod template;
pub mod validate;
pub mod visibility;

pub use config::PreviewConfig;
pub use descriptor::{
    Binding, CONTRACT, FormDescriptor, InputKind, REPORT, Section, SubmissionFields, Title,
    all_descriptors, descriptor_for_editor, descriptor_for_form,
};
pub use error::{ConfigError, PreviewError};
pub use format::{EMPTY_EDITOR_HTML, NOT_SPECIFIED, NodeContent, format_date_input};
pub use platform::{
    FieldState, FormSource, MemoryForm, MemoryPreview, MemorySession, PreviewSink, RichTextHost,
    SubmissionTarget,
};
pub use session::SessionRegistry;
pub use smol_str::SmolStr;
pub use submission::{SubmissionOutcome, prepare_submission};
pub use sync::{PreviewRender, RenderedNode, render_preview, sync_preview};
pub use template::{
    CONTENT_CLASS, GROUP_CLASS, PREVIEW_CLASS, TOGGLE_CLASS, node_ids, render_skeleton,
};
pub use validate::{
    INVALID_BORDER, JSON_FIELDS, JsonLint, REQUIRED_FIELDS_MESSAGE, lint_json, missing_required,
};
pub use visibility::PreviewVisibility;
