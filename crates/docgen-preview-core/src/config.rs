//! Page-level preview configuration.
//!
//! The page passes a JSON object (or nothing) when it creates the
//! controller. Every key is optional; missing keys take the defaults below.

use serde::Deserialize;
use tracing::Level;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreviewConfig {
    /// Delay before a flash message starts fading out.
    pub flash_dismiss_ms: u32,
    /// Duration of the fade before the message is removed.
    pub flash_fade_ms: u32,
    /// Placeholder of editors the controller constructs.
    pub editor_placeholder: String,
    /// Block submits with blank required fields.
    pub validate_forms: bool,
    /// Colour JSON fields by well-formedness on blur.
    pub lint_json: bool,
    /// Console log level. `None` picks DEBUG in debug builds, INFO otherwise.
    pub log_level: Option<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            flash_dismiss_ms: 5000,
            flash_fade_ms: 500,
            editor_placeholder: "Введите текст...".to_string(),
            validate_forms: true,
            lint_json: true,
            log_level: None,
        }
    }
}

impl PreviewConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.log_level {
            level.parse::<Level>().map_err(|e| ConfigError::Invalid {
                field: "logLevel",
                message: e.to_string(),
            })?;
        }
        if self.flash_dismiss_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "flashDismissMs",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Maximum level for console logging.
    pub fn log_level(&self) -> Level {
        self.log_level
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or(if cfg!(debug_assertions) {
                Level::DEBUG
            } else {
                Level::INFO
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = PreviewConfig::from_json("{}").unwrap();
        assert_eq!(config, PreviewConfig::default());
        assert_eq!(config.flash_dismiss_ms, 5000);
        assert_eq!(config.flash_fade_ms, 500);
    }

    #[test]
    fn test_camel_case_keys() {
        let config =
            PreviewConfig::from_json(r#"{"flashDismissMs": 3000, "lintJson": false, "logLevel": "warn"}"#)
                .unwrap();
        assert_eq!(config.flash_dismiss_ms, 3000);
        assert!(!config.lint_json);
        assert!(config.validate_forms);
        assert_eq!(config.log_level(), Level::WARN);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            PreviewConfig::from_json(r#"{"logLevel": "loud"}"#),
            Err(ConfigError::Invalid { field: "logLevel", .. })
        ));
        assert!(matches!(
            PreviewConfig::from_json(r#"{"flashDismissMs": 0}"#),
            Err(ConfigError::Invalid { field: "flashDismissMs", .. })
        ));
        assert!(matches!(
            PreviewConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
