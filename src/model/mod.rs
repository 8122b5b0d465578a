//! Document model types.
//!
//! This module defines the in-memory document tree shared by the collector
//! and the restructurer. It mirrors the parts of WordprocessingML the
//! pipeline cares about: paragraphs, runs, page breaks and one section.

mod document;
mod paragraph;
mod section;

pub use document::{Block, Document, Metadata};
pub use paragraph::{Alignment, InlineContent, Paragraph, ParagraphStyle, TextRun, TextStyle};
pub use section::{Footer, Margins, Section, POINTS_PER_INCH};
