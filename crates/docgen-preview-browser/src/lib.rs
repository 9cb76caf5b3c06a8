//! Browser DOM layer for the docgen live preview.
//!
//! This crate implements the core platform traits over `web-sys` and wires
//! them to page events. It assumes a `wasm32-unknown-unknown` target
//! environment.
//!
//! # Architecture
//!
//! - `dom`: `DomForm` / `DomPreview`, the form source, preview sink and submission target
//! - `quill`: Quill bindings and `QuillSession`, the rich-text host
//! - `renderer`: idempotent creation of the preview panel
//! - `listeners`: input/change wiring that triggers synchronization passes
//! - `toggle`: collapse/expand of a panel
//! - `forms`: required-field validation, JSON cues, flash message dismissal
//!
//! # Re-exports
//!
//! This crate re-exports `docgen-preview-core` for convenience, so consumers
//! only need to depend on `docgen-preview-browser`.

// Re-export core crate
pub use docgen_preview_core;
pub use docgen_preview_core::*;

pub mod dom;
pub mod forms;
pub mod listeners;
pub mod quill;
pub mod renderer;
pub mod toggle;

pub use dom::{DomForm, DomPreview, EDITED_ATTR};
pub use forms::{
    attach_json_lint, attach_required_validation, check_required, schedule_flash_dismissal,
};
pub use listeners::attach_field_listeners;
pub use quill::{Quill, QuillSession, existing_session, init_editor};
pub use renderer::{PreviewStatus, ensure_preview};
pub use toggle::{attach_toggle, toggle_preview};
