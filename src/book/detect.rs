//! Title marker heuristic.

use unicode_normalization::UnicodeNormalization;

use crate::model::{Alignment, Paragraph};

/// Smallest run size (pt) that can carry a title marker.
pub const MIN_MARKER_SIZE: f32 = 12.0;

/// Check whether a paragraph is a collector title block.
///
/// A marker is centered, has at least one explicitly bold run of
/// [`MIN_MARKER_SIZE`] or more, and its text contains `marker_tag`.
/// Unset bold or unset size never qualify.
pub fn is_title_marker(paragraph: &Paragraph, marker_tag: &str) -> bool {
    if paragraph.alignment() != Some(Alignment::Center) || paragraph.run_count() == 0 {
        return false;
    }

    let emphasized = paragraph.runs().any(|run| {
        run.style.is_bold()
            && run
                .style
                .font_size
                .is_some_and(|size| size >= MIN_MARKER_SIZE)
    });

    emphasized && paragraph.plain_text().contains(marker_tag)
}

/// Turn marker text into a poem title.
///
/// Every occurrence of the tag is removed, surrounding whitespace trimmed
/// and the result NFC-normalized.
pub fn clean_title(text: &str, marker_tag: &str) -> String {
    let stripped = if marker_tag.is_empty() {
        text.to_string()
    } else {
        text.replace(marker_tag, "")
    };
    stripped.trim().nfc().collect()
}
