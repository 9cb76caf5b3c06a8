//! Per-kind formatting of form values into preview content.
//!
//! Plain text has two fallbacks: the binding's sample default while the
//! user has not touched the field, and `NOT_SPECIFIED` once they have and
//! left it empty. Dates only ever fall back to the sample default.

use std::fmt;

use chrono::NaiveDate;
use markdown_weaver_escape::{FmtWriter, escape_html_body_text};
use smol_str::SmolStr;

use crate::descriptor::Binding;
use crate::platform::FieldState;

/// Shown for a plain-text field the user has cleared.
pub const NOT_SPECIFIED: &str = "Не указано";

/// What Quill's `root.innerHTML` holds for an empty document.
pub const EMPTY_EDITOR_HTML: &str = "<p><br></p>";

/// Display format of dates in the preview.
pub const DATE_DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// Content written into a preview node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    /// Set as text content. Never interpreted as markup.
    Text(SmolStr),
    /// Set as inner HTML.
    Markup(String),
}

impl NodeContent {
    /// The raw string regardless of how it will be written.
    pub fn as_str(&self) -> &str {
        match self {
            NodeContent::Text(text) => text,
            NodeContent::Markup(html) => html,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, NodeContent::Markup(_))
    }
}

/// Format a plain-text field.
pub fn format_plain_text(binding: &Binding, field: Option<&FieldState>) -> NodeContent {
    let text = match field {
        Some(field) if !field.value.is_empty() => SmolStr::new(&field.value),
        Some(field) if field.edited => SmolStr::new_static(NOT_SPECIFIED),
        _ => SmolStr::new_static(binding.default),
    };
    NodeContent::Text(text)
}

/// Format a date field as `DD.MM.YYYY`.
pub fn format_date(binding: &Binding, field: Option<&FieldState>) -> NodeContent {
    let formatted = field
        .and_then(|f| format_date_input(&f.value))
        .map(SmolStr::from)
        .unwrap_or_else(|| SmolStr::new_static(binding.default));
    NodeContent::Text(formatted)
}

/// Parse the value of a date (or datetime-local) input and format it for display.
///
/// Returns `None` for empty or unparseable input.
pub fn format_date_input(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    // datetime-local values carry a time part after 'T'; only the date is shown.
    let date_part = value.split_once('T').map_or(value, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(|date| date.format(DATE_DISPLAY_FORMAT).to_string())
}

/// Format rich-text editor HTML.
///
/// The editor's empty sentinel counts as no content. Anything else is kept
/// verbatim so formatting shows in the preview.
pub fn format_rich_html(html: &str, placeholder: &str) -> NodeContent {
    let trimmed = html.trim();
    if trimmed.is_empty() || trimmed == EMPTY_EDITOR_HTML {
        placeholder_paragraph(placeholder)
    } else {
        NodeContent::Markup(html.to_string())
    }
}

/// Format the plain textarea used when no editor session exists.
///
/// Each line becomes its own paragraph.
pub fn format_plain_body(field: Option<&FieldState>, placeholder: &str) -> NodeContent {
    let text = field.map(|f| f.value.as_str()).unwrap_or_default();
    if text.trim().is_empty() {
        return placeholder_paragraph(placeholder);
    }

    let mut html = String::with_capacity(text.len() + 16);
    // Writing to a String cannot fail.
    let _ = write_paragraphs(&mut html, text);
    NodeContent::Markup(html)
}

fn write_paragraphs(out: &mut String, text: &str) -> fmt::Result {
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        out.push_str("<p>");
        escape_html_body_text(FmtWriter(&mut *out), line)?;
        out.push_str("</p>");
    }
    Ok(())
}

pub fn placeholder_paragraph(placeholder: &str) -> NodeContent {
    let mut html = String::from(r#"<p class="preview-placeholder">"#);
    let _ = escape_html_body_text(FmtWriter(&mut html), placeholder);
    html.push_str("</p>");
    NodeContent::Markup(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::CONTRACT;

    fn binding(field: &str) -> &'static Binding {
        CONTRACT
            .bindings()
            .find(|b| b.field == field)
            .expect("binding exists")
    }

    fn untouched(value: &str) -> FieldState {
        FieldState {
            value: value.to_string(),
            edited: false,
        }
    }

    fn edited(value: &str) -> FieldState {
        FieldState {
            value: value.to_string(),
            edited: true,
        }
    }

    #[test]
    fn test_plain_text_passes_value_through() {
        let b = binding("contract_number");
        let content = format_plain_text(b, Some(&edited("ДГ-2024-777")));
        assert_eq!(content, NodeContent::Text("ДГ-2024-777".into()));
    }

    #[test]
    fn test_plain_text_two_tier_fallback() {
        let b = binding("party1_name");
        // Never touched: sample default.
        assert_eq!(format_plain_text(b, None).as_str(), "ООО 'Компания'");
        assert_eq!(format_plain_text(b, Some(&untouched(""))).as_str(), "ООО 'Компания'");
        // Touched and cleared: explicit absence.
        assert_eq!(format_plain_text(b, Some(&edited(""))).as_str(), NOT_SPECIFIED);
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_date_input("2024-12-20").as_deref(), Some("20.12.2024"));
        assert_eq!(format_date_input("2025-01-05").as_deref(), Some("05.01.2025"));
        assert_eq!(format_date_input("2024-03-01T09:30").as_deref(), Some("01.03.2024"));
        assert_eq!(format_date_input(" 2024-02-29 ").as_deref(), Some("29.02.2024"));
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert_eq!(format_date_input(""), None);
        assert_eq!(format_date_input("2023-02-29"), None);
        assert_eq!(format_date_input("20.12.2024"), None);
        assert_eq!(format_date_input("tomorrow"), None);
    }

    #[test]
    fn test_date_never_uses_not_specified() {
        let b = binding("deadline");
        assert_eq!(format_date(b, Some(&edited(""))).as_str(), "31.12.2024");
        assert_eq!(format_date(b, Some(&edited("not-a-date"))).as_str(), "31.12.2024");
        assert_eq!(format_date(b, None).as_str(), "31.12.2024");
        assert_eq!(format_date(b, Some(&edited("2024-12-20"))).as_str(), "20.12.2024");
    }

    #[test]
    fn test_rich_html_empty_sentinel() {
        let content = format_rich_html("<p><br></p>", "Текст документа...");
        assert_eq!(
            content,
            NodeContent::Markup(r#"<p class="preview-placeholder">Текст документа...</p>"#.into())
        );
        assert_eq!(format_rich_html("  \n", "x"), placeholder_paragraph("x"));
    }

    #[test]
    fn test_rich_html_kept_verbatim() {
        let html = "<h2>Раздел</h2><p><strong>bold</strong> & more</p>";
        assert_eq!(format_rich_html(html, "x"), NodeContent::Markup(html.to_string()));
    }

    #[test]
    fn test_plain_body_splits_lines() {
        let field = untouched("first line\r\nsecond <b>line</b>");
        let content = format_plain_body(Some(&field), "x");
        assert_eq!(
            content.as_str(),
            "<p>first line</p><p>second &lt;b&gt;line&lt;/b&gt;</p>"
        );
        assert!(content.is_markup());
    }

    #[test]
    fn test_placeholder_is_escaped() {
        assert_eq!(
            placeholder_paragraph("a < b & c").as_str(),
            r#"<p class="preview-placeholder">a &lt; b &amp; c</p>"#
        );
    }

    #[test]
    fn test_plain_body_blank_uses_placeholder() {
        assert_eq!(format_plain_body(None, "x"), placeholder_paragraph("x"));
        assert_eq!(
            format_plain_body(Some(&edited("   ")), "x"),
            placeholder_paragraph("x")
        );
    }
}
