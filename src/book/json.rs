//! JSON listing of detected poems.

use serde::Serialize;

use super::segment::Poem;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// One row of the poem listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoemSummary<'a> {
    /// 1-based position in the book
    pub number: usize,
    /// Poem title
    pub title: &'a str,
    /// Stanza count
    pub stanzas: usize,
    /// Non-blank line count
    pub lines: usize,
    /// Word count
    pub words: usize,
}

impl<'a> PoemSummary<'a> {
    /// Summarize the poem at `number` (1-based).
    pub fn new(number: usize, poem: &'a Poem) -> Self {
        Self {
            number,
            title: &poem.title,
            stanzas: poem.stanza_count(),
            lines: poem.line_count(),
            words: poem.word_count(),
        }
    }
}

/// Summaries for every poem, numbered from 1.
pub fn summarize(poems: &[Poem]) -> Vec<PoemSummary<'_>> {
    poems
        .iter()
        .enumerate()
        .map(|(idx, poem)| PoemSummary::new(idx + 1, poem))
        .collect()
}

/// Serialize the poem listing to JSON.
pub fn poems_to_json(poems: &[Poem], format: JsonFormat) -> Result<String> {
    let listing = summarize(poems);
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&listing),
        JsonFormat::Compact => serde_json::to_string(&listing),
    };

    result.map_err(|e| Error::Other(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    fn poems() -> Vec<Poem> {
        let mut a = Poem::new("Rosa");
        a.paragraphs.push(Paragraph::with_text("pétala e espinho"));
        vec![a, Poem::new("Lua")]
    }

    #[test]
    fn test_poems_to_json_compact() {
        let json = poems_to_json(&poems(), JsonFormat::Compact).unwrap();
        assert!(json.starts_with("[{\"number\":1,\"title\":\"Rosa\""));
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_poems_to_json_pretty() {
        let json = poems_to_json(&poems(), JsonFormat::Pretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["title"], "Lua");
        assert_eq!(value[0]["words"], 3);
        assert_eq!(value[0]["lines"], 1);
    }
}
