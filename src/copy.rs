//! Paragraph and run copy primitives shared by both pipeline stages.

use crate::model::{Document, InlineContent, Paragraph, TextRun, TextStyle};

/// Copy a run: text, bold, italic, underline, size and font name.
///
/// Unset attributes stay unset in the copy.
pub fn copy_run(source: &TextRun) -> TextRun {
    TextRun {
        text: source.text.clone(),
        style: TextStyle {
            bold: source.style.bold,
            italic: source.style.italic,
            underline: source.style.underline,
            font_name: source.style.font_name.clone(),
            font_size: source.style.font_size,
        },
    }
}

/// Build a detached copy of a paragraph.
///
/// Alignment, style id, spacing and indent are kept; every run is copied
/// through [`copy_run`] and fields are carried over as-is.
pub fn clone_paragraph(source: &Paragraph) -> Paragraph {
    Paragraph {
        style: source.style.clone(),
        content: source
            .content
            .iter()
            .map(|inline| match inline {
                InlineContent::Text(run) => InlineContent::Text(copy_run(run)),
                field @ InlineContent::Field { .. } => field.clone(),
            })
            .collect(),
    }
}

/// Append a copy of `source` to `target` and return the new paragraph.
pub fn copy_paragraph<'a>(source: &Paragraph, target: &'a mut Document) -> &'a mut Paragraph {
    target.add_paragraph(clone_paragraph(source))
}
