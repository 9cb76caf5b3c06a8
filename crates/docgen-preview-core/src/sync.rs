//! The synchronization pass: form state in, preview node contents out.
//!
//! Every pass re-reads every bound source and rewrites every bound node.
//! Nothing is carried between passes, so the preview after a pass depends
//! only on the form and editor state at the time of the call.

use smol_str::SmolStr;

use crate::descriptor::{Binding, FormDescriptor, InputKind};
use crate::format::{
    NodeContent, format_date, format_plain_body, format_plain_text, format_rich_html,
};
use crate::platform::{FormSource, PreviewSink, RichTextHost};
use crate::session::SessionRegistry;

/// Content computed for one preview node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNode {
    pub node_id: SmolStr,
    pub content: NodeContent,
}

/// Result of one synchronization pass, in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewRender {
    pub nodes: Vec<RenderedNode>,
}

impl PreviewRender {
    pub fn get(&self, node_id: &str) -> Option<&NodeContent> {
        self.nodes
            .iter()
            .find(|n| n.node_id == node_id)
            .map(|n| &n.content)
    }

    /// Write every node into the sink, replacing previous content.
    pub fn apply<S: PreviewSink + ?Sized>(&self, sink: &mut S) {
        for node in &self.nodes {
            sink.write(&node.node_id, &node.content);
        }
    }

    /// One `node_id: content` line per node. Used for logging and snapshots.
    pub fn listing(&self) -> String {
        self.nodes
            .iter()
            .map(|n| match &n.content {
                NodeContent::Text(text) => format!("{}: {}", n.node_id, text),
                NodeContent::Markup(html) => format!("{}: <html> {}", n.node_id, html),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compute the content of every bound node of `descriptor`.
pub fn render_preview<F, H>(
    descriptor: &FormDescriptor,
    source: &F,
    sessions: &SessionRegistry<H>,
) -> PreviewRender
where
    F: FormSource + ?Sized,
    H: RichTextHost,
{
    let nodes = descriptor
        .bindings()
        .map(|binding| RenderedNode {
            node_id: SmolStr::new_static(binding.node_id),
            content: render_binding(descriptor, binding, source, sessions),
        })
        .collect();
    PreviewRender { nodes }
}

fn render_binding<F, H>(
    descriptor: &FormDescriptor,
    binding: &Binding,
    source: &F,
    sessions: &SessionRegistry<H>,
) -> NodeContent
where
    F: FormSource + ?Sized,
    H: RichTextHost,
{
    match binding.kind {
        InputKind::PlainText => format_plain_text(binding, source.field(binding.field).as_ref()),
        InputKind::Date => format_date(binding, source.field(binding.field).as_ref()),
        InputKind::RichText { placeholder } => match sessions.get(descriptor.editor_id) {
            Some(session) => format_rich_html(&session.content_html(), placeholder),
            None => format_plain_body(source.field(binding.field).as_ref(), placeholder),
        },
    }
}

/// Run one synchronization pass and write the result into `sink`.
pub fn sync_preview<F, H, S>(
    descriptor: &FormDescriptor,
    source: &F,
    sessions: &SessionRegistry<H>,
    sink: &mut S,
) -> PreviewRender
where
    F: FormSource + ?Sized,
    H: RichTextHost,
    S: PreviewSink + ?Sized,
{
    let render = render_preview(descriptor, source, sessions);
    tracing::trace!(
        form_id = descriptor.form_id,
        nodes = render.nodes.len(),
        editor = sessions.contains(descriptor.editor_id),
        "synchronized preview"
    );
    render.apply(sink);
    render
}
