//! Book statistics.

use serde::{Deserialize, Serialize};

use super::segment::Poem;

/// Statistics collected while restructuring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookStats {
    /// Poems in the book
    pub poem_count: u32,

    /// Stanzas across all poems
    pub stanza_count: u32,

    /// Non-blank lines across all poems
    pub line_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Paragraphs seen before the first title and left out
    pub discarded_count: u32,
}

impl BookStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics for a list of poems.
    pub fn from_poems(poems: &[Poem]) -> Self {
        let mut stats = Self::new();
        for poem in poems {
            stats.add_poem(poem);
        }
        stats
    }

    /// Count one poem.
    pub fn add_poem(&mut self, poem: &Poem) {
        self.poem_count += 1;
        self.stanza_count += poem.stanza_count() as u32;
        self.line_count += poem.line_count() as u32;
        self.word_count += poem.word_count() as u32;
    }
}
