//! Document-level types.

use super::{Paragraph, Section};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A word-processing document held fully in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Core properties (title, author, dates)
    pub metadata: Metadata,

    /// Body content in document order
    pub blocks: Vec<Block>,

    /// Page setup and footer of the (single) section
    pub section: Section,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph and return it for further edits.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> &mut Paragraph {
        self.blocks.push(Block::Paragraph(paragraph));
        match self.blocks.last_mut() {
            Some(Block::Paragraph(p)) => p,
            _ => unreachable!("a paragraph was just pushed"),
        }
    }

    /// Append an empty paragraph.
    pub fn add_blank_paragraph(&mut self) {
        self.blocks.push(Block::Paragraph(Paragraph::new()));
    }

    /// Append `count` empty paragraphs.
    pub fn add_blank_paragraphs(&mut self, count: usize) {
        for _ in 0..count {
            self.add_blank_paragraph();
        }
    }

    /// Append an explicit page break.
    pub fn add_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    /// Body blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Paragraphs in document order, page breaks skipped.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Number of paragraphs (page breaks excluded).
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Number of explicit page breaks.
    pub fn page_break_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
    }

    /// The document section.
    pub fn section(&self) -> &Section {
        &self.section
    }

    /// Mutable access to the document section.
    pub fn section_mut(&mut self) -> &mut Section {
        &mut self.section
    }

    /// Check if the document has no body content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document, one paragraph per line.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A body-level element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "paragraph", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph
    Paragraph(Paragraph),
    /// Start a new page
    PageBreak,
}

impl Block {
    /// The paragraph, unless this is a page break.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::PageBreak => None,
        }
    }

    /// Check if this block is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }
}

/// Document core properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
