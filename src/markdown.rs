//! Markdown rendering for Delta documents.
//!
//! Walks the insert operations in order and accumulates Markdown text.
//! Inline attributes wrap the run they sit on; attributes carried by a
//! `"\n"`-only insert are line attributes and format the line that
//! precedes them, which is how Quill encodes headings, lists and code
//! blocks.

use crate::delta::{Attributes, Delta, DeltaError, Insert, ListKind};

/// Render a Delta document as Markdown.
pub fn render(delta: &Delta) -> String {
    let mut out = String::new();
    for op in &delta.ops {
        match &op.insert {
            Insert::Text(text) => render_text(text, op.attributes.as_ref(), &mut out),
            Insert::Image(image) => {
                out.push_str("![](");
                out.push_str(&image.image);
                out.push(')');
            }
        }
    }
    out
}

/// Parse a Delta JSON document and render it as Markdown.
///
/// # Errors
/// Returns [`DeltaError`] when the input is not a well-formed Delta
/// document.
pub fn render_json(json: &str) -> Result<String, DeltaError> {
    Ok(render(&Delta::from_json(json)?))
}

fn render_text(text: &str, attributes: Option<&Attributes>, out: &mut String) {
    let Some(attributes) = attributes else {
        out.push_str(text);
        return;
    };

    if text == "\n" {
        format_previous_line(attributes, out);
        return;
    }

    let mut piece = text.to_string();
    apply(attributes, &mut piece);
    out.push_str(&piece);
}

// A lone "\n" carrying attributes formats the whole preceding line: pull
// the last line back out of the output, wrap it (newline included, so the
// wrap closes after the break exactly as the inline path would), and
// re-append it.
fn format_previous_line(attributes: &Attributes, out: &mut String) {
    let mut lines: Vec<&str> = out.split('\n').collect();
    let mut line = lines.pop().unwrap_or_default().to_string();
    let had_head = !lines.is_empty();
    let kept = lines.join("\n");
    out.clear();
    // The pop consumed the separating newline, so put it back.
    if had_head {
        out.push_str(&kept);
        out.push('\n');
    }
    line.push('\n');
    apply(attributes, &mut line);
    out.push_str(&line);
}

fn apply(attributes: &Attributes, text: &mut String) {
    // A code block suppresses all other formatting.
    if attributes.code_block == Some(true) {
        *text = format!("```\n{text}```");
        return;
    }
    if attributes.bold == Some(true) {
        *text = format!("**{text}**");
    }
    if attributes.italic == Some(true) {
        *text = format!("*{text}*");
    }
    if attributes.strike == Some(true) {
        *text = format!("~~{text}~~");
    }
    if let Some(level) = attributes.header {
        // Levels five and up have no toolbar button and render as plain text.
        if level < 5 {
            *text = format!("{} {text}", "#".repeat(level as usize));
        }
    }
    if let Some(kind) = attributes.list {
        let prefix = match kind {
            ListKind::Ordered => "1. ",
            ListKind::Bullet => "- ",
        };
        *text = format!("{prefix}{text}");
    }
}
