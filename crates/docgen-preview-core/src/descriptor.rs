//! Form descriptors: which form fields feed which preview nodes.
//!
//! A `FormDescriptor` is fixed at build time, one per document type. The
//! server renders the document from the same field names, so the names here
//! are a contract with the page templates and must not drift.

/// How a bound field's raw value is turned into preview content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Passed through; empty falls back to the default or "not specified".
    PlainText,
    /// `YYYY-MM-DD` input shown as `DD.MM.YYYY`; empty or invalid falls back to the default.
    Date,
    /// Rich-text editor HTML, or the plain textarea when no editor session exists.
    RichText {
        /// Text of the placeholder paragraph shown when there is no content.
        placeholder: &'static str,
    },
}

/// A single source-field to preview-node mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// `name` attribute of the source input/textarea.
    pub field: &'static str,
    /// DOM id of the preview node this binding writes into.
    pub node_id: &'static str,
    /// Label shown in front of the node in the preview.
    pub label: &'static str,
    pub kind: InputKind,
    /// Sample value shown before the user has touched the field.
    pub default: &'static str,
    /// Literal text rendered after the node (units and the like).
    pub suffix: Option<&'static str>,
    /// Render the node as a block element instead of an inline one.
    pub block: bool,
}

impl Binding {
    /// A plain-text binding.
    pub const fn text(
        field: &'static str,
        node_id: &'static str,
        label: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            field,
            node_id,
            label,
            kind: InputKind::PlainText,
            default,
            suffix: None,
            block: false,
        }
    }

    /// A date binding.
    pub const fn date(
        field: &'static str,
        node_id: &'static str,
        label: &'static str,
        default: &'static str,
    ) -> Self {
        Self {
            kind: InputKind::Date,
            ..Self::text(field, node_id, label, default)
        }
    }

    /// A rich-text binding. Always a block node.
    pub const fn rich_text(
        field: &'static str,
        node_id: &'static str,
        label: &'static str,
        placeholder: &'static str,
    ) -> Self {
        Self {
            kind: InputKind::RichText { placeholder },
            block: true,
            ..Self::text(field, node_id, label, placeholder)
        }
    }

    pub const fn block(self) -> Self {
        Self {
            block: true,
            ..self
        }
    }

    pub const fn with_suffix(self, suffix: &'static str) -> Self {
        Self {
            suffix: Some(suffix),
            ..self
        }
    }

    pub fn is_rich_text(&self) -> bool {
        matches!(self.kind, InputKind::RichText { .. })
    }
}

/// Document title shown at the top of the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Title {
    /// A literal that never changes.
    Fixed {
        node_id: &'static str,
        text: &'static str,
    },
    /// A title read from a form field like any other binding.
    Bound(Binding),
}

impl Title {
    pub fn node_id(&self) -> &'static str {
        match self {
            Title::Fixed { node_id, .. } => node_id,
            Title::Bound(binding) => binding.node_id,
        }
    }

    /// Text the title node shows before the first synchronization pass.
    pub fn initial_text(&self) -> &'static str {
        match self {
            Title::Fixed { text, .. } => text,
            Title::Bound(binding) => binding.default,
        }
    }
}

/// A visual group of bindings in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub bindings: &'static [Binding],
    /// Signature rows get their own styling.
    pub signatures: bool,
}

/// Field names the submission bridge writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionFields {
    /// Hidden input carrying the editor HTML. Created on first submit.
    pub html_field: &'static str,
    /// Plain-text textarea kept in sync for consumers that only read text.
    pub text_field: &'static str,
}

/// Static description of one document type's form and preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormDescriptor {
    /// DOM id of the `<form>`.
    pub form_id: &'static str,
    /// Id of the rich-text container and of its editor session.
    pub editor_id: &'static str,
    /// Heading of the preview panel.
    pub heading: &'static str,
    /// Extra class on the preview content region.
    pub kind_class: &'static str,
    pub title: Title,
    pub sections: &'static [Section],
    pub submission: SubmissionFields,
}

impl FormDescriptor {
    /// Every binding in synchronization order: a bound title first, then
    /// sections top to bottom.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> + '_ {
        let title = match &self.title {
            Title::Bound(binding) => Some(binding),
            Title::Fixed { .. } => None,
        };
        title
            .into_iter()
            .chain(self.sections.iter().flat_map(|s| s.bindings.iter()))
    }

    /// The binding fed by the rich-text editor, if the form has one.
    pub fn rich_text_binding(&self) -> Option<&Binding> {
        self.bindings().find(|b| b.is_rich_text())
    }
}

const SUBMISSION: SubmissionFields = SubmissionFields {
    html_field: "content_html",
    text_field: "content",
};

/// Contract ("Word") form.
pub static CONTRACT: FormDescriptor = FormDescriptor {
    form_id: "word-form",
    editor_id: "word-content-editor",
    heading: "📄 Предпросмотр документа",
    kind_class: "word-preview",
    title: Title::Fixed {
        node_id: "preview-word-title",
        text: "ДОГОВОР",
    },
    sections: &[
        Section {
            bindings: &[
                Binding::text(
                    "contract_number",
                    "preview-word-contract-number",
                    "Номер договора",
                    "ДГ-2024-001",
                ),
                Binding::date("date", "preview-word-date", "Дата", "20.12.2024"),
            ],
            signatures: false,
        },
        Section {
            bindings: &[
                Binding::text(
                    "party1_name",
                    "preview-word-party1",
                    "Сторона 1 (Заказчик)",
                    "ООО 'Компания'",
                ),
                Binding::text(
                    "party2_name",
                    "preview-word-party2",
                    "Сторона 2 (Исполнитель)",
                    "ООО 'Система Связи'",
                ),
            ],
            signatures: false,
        },
        Section {
            bindings: &[Binding::text(
                "subject",
                "preview-word-subject",
                "Предмет договора",
                "Описание предмета договора",
            )
            .block()],
            signatures: false,
        },
        Section {
            bindings: &[
                Binding::text("amount", "preview-word-amount", "Сумма", "500 000")
                    .with_suffix(" руб."),
                Binding::date(
                    "deadline",
                    "preview-word-deadline",
                    "Срок выполнения",
                    "31.12.2024",
                ),
            ],
            signatures: false,
        },
        Section {
            bindings: &[Binding::rich_text(
                "content",
                "preview-word-content",
                "Дополнительное содержимое",
                "Дополнительный текст документа...",
            )],
            signatures: false,
        },
        Section {
            bindings: &[
                Binding::text(
                    "customer_signature",
                    "preview-word-customer",
                    "Подпись заказчика",
                    "Иванов И.И.",
                ),
                Binding::text(
                    "executor_signature",
                    "preview-word-executor",
                    "Подпись исполнителя",
                    "Веселенко Т.Н.",
                ),
            ],
            signatures: true,
        },
    ],
    submission: SUBMISSION,
};

/// Financial report ("PDF") form.
pub static REPORT: FormDescriptor = FormDescriptor {
    form_id: "pdf-form",
    editor_id: "pdf-content-editor",
    heading: "📄 Предпросмотр PDF",
    kind_class: "pdf-preview",
    title: Title::Bound(Binding::text(
        "title",
        "preview-pdf-title",
        "Заголовок",
        "Финансовый отчет",
    )),
    sections: &[
        Section {
            bindings: &[Binding::date("date", "preview-pdf-date", "Дата", "20.12.2024")],
            signatures: false,
        },
        Section {
            bindings: &[Binding::rich_text(
                "content",
                "preview-pdf-content",
                "Содержимое",
                "Текст документа...",
            )],
            signatures: false,
        },
        Section {
            bindings: &[Binding::text(
                "signature",
                "preview-pdf-signature",
                "Подпись",
                "Иванов И.И.",
            )],
            signatures: true,
        },
    ],
    submission: SUBMISSION,
};

/// All known document types, in page order.
pub fn all_descriptors() -> [&'static FormDescriptor; 2] {
    [&CONTRACT, &REPORT]
}

pub fn descriptor_for_form(form_id: &str) -> Option<&'static FormDescriptor> {
    all_descriptors().into_iter().find(|d| d.form_id == form_id)
}

pub fn descriptor_for_editor(editor_id: &str) -> Option<&'static FormDescriptor> {
    all_descriptors()
        .into_iter()
        .find(|d| d.editor_id == editor_id)
}
