//! Form checks that run alongside the preview: required fields on submit
//! and JSON well-formedness of the table data fields on blur.
//!
//! Both are advisory. Results only drive border colours and an alert; they
//! never touch the preview.

/// Border colour of a field that failed a check.
pub const INVALID_BORDER: &str = "#f44336";
/// Border colour of a JSON field that parsed.
pub const VALID_BORDER: &str = "#4CAF50";
/// Alert shown when a submit is blocked by blank required fields.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Пожалуйста, заполните все обязательные поля";
/// Textareas that carry JSON payloads.
pub const JSON_FIELDS: [&str; 2] = ["table_data", "additional_data"];

/// Keys of required fields whose value is blank after trimming.
///
/// Keys are whatever identifies a field to the caller: names, indices.
pub fn missing_required<'a, K, I>(fields: I) -> Vec<K>
where
    I: IntoIterator<Item = (K, &'a str)>,
{
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

/// Outcome of checking a JSON field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonLint {
    /// Nothing to check.
    Empty,
    Valid,
    /// Parser message for the first error.
    Invalid(String),
}

impl JsonLint {
    /// Border colour cue, or `None` to leave the field as it is.
    pub fn border_color(&self) -> Option<&'static str> {
        match self {
            JsonLint::Empty => None,
            JsonLint::Valid => Some(VALID_BORDER),
            JsonLint::Invalid(_) => Some(INVALID_BORDER),
        }
    }
}

pub fn lint_json(value: &str) -> JsonLint {
    let value = value.trim();
    if value.is_empty() {
        return JsonLint::Empty;
    }
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(_) => JsonLint::Valid,
        Err(e) => JsonLint::Invalid(e.to_string()),
    }
}
