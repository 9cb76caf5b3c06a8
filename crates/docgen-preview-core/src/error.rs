//! Error types for preview operations.
//!
//! None of these reach the user. The page controller logs them and carries
//! on; a missing DOM node is not an error at all, just a form that does not
//! apply to the current page state.

/// Main error type for preview operations.
#[derive(thiserror::Error, Debug)]
pub enum PreviewError {
    /// No descriptor for this form id.
    #[error("unknown form: {0}")]
    UnknownForm(String),

    /// No descriptor for this editor id.
    #[error("unknown editor: {0}")]
    UnknownEditor(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A DOM call threw.
    #[error("dom operation failed: {0}")]
    Dom(String),
}

/// Configuration loading errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse preview config")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, PreviewError>;
