//! Splitting a consolidated document into poems.

use serde::{Deserialize, Serialize};

use super::detect::{clean_title, is_title_marker};
use crate::model::{Block, Document, Paragraph};

/// One poem recovered from a consolidated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poem {
    /// Cleaned title
    pub title: String,

    /// Body paragraphs in source order, blank lines included
    pub paragraphs: Vec<Paragraph>,
}

impl Poem {
    /// Create a poem with an empty body.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs: Vec::new(),
        }
    }

    /// Number of non-blank lines.
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().filter(|p| !p.is_blank()).count()
    }

    /// Number of stanzas (runs of non-blank lines separated by blank ones).
    pub fn stanza_count(&self) -> usize {
        let mut count = 0;
        let mut in_stanza = false;
        for p in &self.paragraphs {
            if p.is_blank() {
                in_stanza = false;
            } else if !in_stanza {
                in_stanza = true;
                count += 1;
            }
        }
        count
    }

    /// Whitespace-separated word count.
    pub fn word_count(&self) -> usize {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text().split_whitespace().count())
            .sum()
    }
}

struct OpenPoem {
    poem: Poem,
    /// The blank line right after a marker is part of the title block.
    awaiting_spacer: bool,
}

/// Single-pass accumulator that turns blocks into poems.
///
/// At most one poem is open at a time. A marker closes the open poem and
/// opens the next one; poems whose body stays empty are dropped.
pub struct Segmenter<'a> {
    marker_tag: &'a str,
    current: Option<OpenPoem>,
    poems: Vec<Poem>,
    discarded: usize,
}

impl<'a> Segmenter<'a> {
    /// Create a segmenter recognising markers that contain `marker_tag`.
    pub fn new(marker_tag: &'a str) -> Self {
        Self {
            marker_tag,
            current: None,
            poems: Vec::new(),
            discarded: 0,
        }
    }

    /// Feed the next block.
    pub fn push(&mut self, block: &Block) {
        // Breaks are layout only.
        if let Block::Paragraph(paragraph) = block {
            self.push_paragraph(paragraph);
        }
    }

    /// Feed the next paragraph.
    pub fn push_paragraph(&mut self, paragraph: &Paragraph) {
        if is_title_marker(paragraph, self.marker_tag) {
            self.close();
            let title = clean_title(&paragraph.plain_text(), self.marker_tag);
            self.current = Some(OpenPoem {
                poem: Poem::new(title),
                awaiting_spacer: true,
            });
            return;
        }

        match self.current.as_mut() {
            Some(open) => {
                if std::mem::take(&mut open.awaiting_spacer) && paragraph.is_blank() {
                    return;
                }
                open.poem.paragraphs.push(paragraph.clone());
            }
            None => {
                self.discarded += 1;
                log::debug!(
                    "Discarding paragraph before the first title: {:?}",
                    paragraph.plain_text()
                );
            }
        }
    }

    fn close(&mut self) {
        if let Some(open) = self.current.take() {
            if open.poem.paragraphs.is_empty() {
                log::debug!("Dropping poem without content: {}", open.poem.title);
            } else {
                self.poems.push(open.poem);
            }
        }
    }

    /// Paragraphs seen before any marker.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Close the open poem and return every poem in order.
    pub fn finish(mut self) -> Vec<Poem> {
        self.close();
        self.poems
    }
}

/// Segment a consolidated document into poems.
pub fn segment(document: &Document, marker_tag: &str) -> Vec<Poem> {
    let mut segmenter = Segmenter::new(marker_tag);
    for block in document.blocks() {
        segmenter.push(block);
    }
    if segmenter.discarded() > 0 {
        log::debug!(
            "{} paragraphs preceded the first title and were skipped",
            segmenter.discarded()
        );
    }
    segmenter.finish()
}
