//! Static preview skeleton markup.
//!
//! The skeleton mirrors the server-side document template: a title, one
//! section per descriptor section, one labeled row per binding. Every node
//! starts with its binding's sample default until the first pass runs.

use std::fmt::Write;

use markdown_weaver_escape::{FmtWriter, escape_html};

use crate::descriptor::{Binding, FormDescriptor, InputKind};
use crate::format::placeholder_paragraph;
use crate::visibility::PreviewVisibility;

/// Class of the preview container. Its presence marks a form as initialized.
pub const PREVIEW_CLASS: &str = "document-preview";
/// Class of the collapsible region.
pub const CONTENT_CLASS: &str = "preview-content";
/// Class of the collapse/expand button.
pub const TOGGLE_CLASS: &str = "preview-toggle";
/// Class of the form group wrapping the rich-text container.
pub const GROUP_CLASS: &str = "form-group";

/// Ids of every node the skeleton creates for `descriptor`, title first.
pub fn node_ids(descriptor: &FormDescriptor) -> impl Iterator<Item = &'static str> + '_ {
    let bound_title = matches!(descriptor.title, crate::descriptor::Title::Bound(_));
    std::iter::once(descriptor.title.node_id()).chain(
        descriptor
            .bindings()
            .skip(usize::from(bound_title))
            .map(|b| b.node_id),
    )
}

/// Inner markup of the preview container for `descriptor`.
pub fn render_skeleton(descriptor: &FormDescriptor, visibility: PreviewVisibility) -> String {
    let mut html = String::with_capacity(2048);
    // Writing to a String cannot fail.
    let _ = write_skeleton(&mut html, descriptor, visibility);
    html
}

fn write_skeleton(
    out: &mut String,
    descriptor: &FormDescriptor,
    visibility: PreviewVisibility,
) -> std::fmt::Result {
    out.push_str(r#"<div class="preview-header"><h4>"#);
    escape_html(FmtWriter(&mut *out), descriptor.heading)?;
    write!(
        out,
        r#"</h4><button type="button" class="{TOGGLE_CLASS}">{button}</button></div>"#,
        button = visibility.button_markup(),
    )?;
    write!(
        out,
        r#"<div class="{CONTENT_CLASS} {kind}" style="display: {display};"><div class="preview-document">"#,
        kind = descriptor.kind_class,
        display = visibility.display(),
    )?;
    write!(
        out,
        r#"<div class="preview-title" id="{id}">"#,
        id = descriptor.title.node_id(),
    )?;
    escape_html(FmtWriter(&mut *out), descriptor.title.initial_text())?;
    out.push_str("</div>");

    for section in descriptor.sections {
        if section.signatures {
            out.push_str(r#"<div class="preview-section preview-signatures">"#);
        } else {
            out.push_str(r#"<div class="preview-section">"#);
        }
        for binding in section.bindings {
            write_field(out, binding)?;
        }
        out.push_str("</div>");
    }

    out.push_str("</div></div>");
    Ok(())
}

fn write_field(out: &mut String, binding: &Binding) -> std::fmt::Result {
    out.push_str(r#"<div class="preview-field"><strong>"#);
    escape_html(FmtWriter(&mut *out), binding.label)?;
    out.push_str(":</strong> ");

    let (tag, extra_class) = match (binding.block, binding.kind) {
        (_, InputKind::RichText { .. }) => ("div", " preview-html-content"),
        (true, _) => ("div", " preview-text"),
        (false, _) => ("span", ""),
    };
    write!(
        out,
        r#"<{tag} id="{id}" class="preview-value{extra_class}">"#,
        id = binding.node_id,
    )?;
    match binding.kind {
        InputKind::RichText { placeholder } => {
            out.push_str(placeholder_paragraph(placeholder).as_str());
        }
        _ => escape_html(FmtWriter(&mut *out), binding.default)?,
    }
    write!(out, "</{tag}>")?;

    if let Some(suffix) = binding.suffix {
        escape_html(FmtWriter(&mut *out), suffix)?;
    }
    out.push_str("</div>");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{CONTRACT, REPORT};

    #[test]
    fn test_node_ids_cover_title_and_bindings() {
        let ids: Vec<_> = node_ids(&REPORT).collect();
        assert_eq!(
            ids,
            [
                "preview-pdf-title",
                "preview-pdf-date",
                "preview-pdf-content",
                "preview-pdf-signature",
            ]
        );
        assert_eq!(node_ids(&CONTRACT).count(), 11);
    }

    #[test]
    fn test_skeleton_contains_every_node_once() {
        for descriptor in [&CONTRACT, &REPORT] {
            let html = render_skeleton(descriptor, PreviewVisibility::Expanded);
            for id in node_ids(descriptor) {
                let needle = format!(r#"id="{id}""#);
                assert_eq!(html.matches(&needle).count(), 1, "{id}");
            }
        }
    }

    #[test]
    fn test_skeleton_report() {
        let html = render_skeleton(&REPORT, PreviewVisibility::Expanded);
        insta::assert_snapshot!(html.replace("><", ">\n<"), @r#"
        <div class="preview-header">
        <h4>📄 Предпросмотр PDF</h4>
        <button type="button" class="preview-toggle">
        <span class="preview-icon">▼</span> Свернуть</button>
        </div>
        <div class="preview-content pdf-preview" style="display: block;">
        <div class="preview-document">
        <div class="preview-title" id="preview-pdf-title">Финансовый отчет</div>
        <div class="preview-section">
        <div class="preview-field">
        <strong>Дата:</strong> <span id="preview-pdf-date" class="preview-value">20.12.2024</span>
        </div>
        </div>
        <div class="preview-section">
        <div class="preview-field">
        <strong>Содержимое:</strong> <div id="preview-pdf-content" class="preview-value preview-html-content">
        <p class="preview-placeholder">Текст документа...</p>
        </div>
        </div>
        </div>
        <div class="preview-section preview-signatures">
        <div class="preview-field">
        <strong>Подпись:</strong> <span id="preview-pdf-signature" class="preview-value">Иванов И.И.</span>
        </div>
        </div>
        </div>
        </div>
        "#);
    }

    #[test]
    fn test_skeleton_escapes_literals_and_keeps_suffix() {
        let html = render_skeleton(&CONTRACT, PreviewVisibility::Collapsed);
        assert!(html.contains(r#"class="preview-value">ООО 'Компания'</span>"#));
        assert!(html.contains(r#"<span id="preview-word-amount" class="preview-value">500 000</span> руб.</div>"#));
        assert!(html.contains(r#"class="preview-value preview-text">Описание предмета договора</div>"#));
        assert!(html.contains(r#"style="display: none;""#));
        assert!(html.contains("Развернуть"));
    }
}
