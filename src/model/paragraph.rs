//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
///
/// A paragraph without any runs is a valid blank line; poems use those as
/// stanza separators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Runs and fields in the paragraph
    pub content: Vec<InlineContent>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with one plain text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create an empty paragraph with the given alignment.
    pub fn aligned(alignment: Alignment) -> Self {
        let mut p = Self::new();
        p.style.alignment = Some(alignment);
        p
    }

    /// Set the alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.style.alignment = Some(alignment);
        self
    }

    /// Set the named style.
    pub fn with_style_id(mut self, style_id: impl Into<String>) -> Self {
        self.style.style_id = Some(style_id.into());
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.add_run(TextRun::new(text));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add a field (e.g. `PAGE`) to the paragraph.
    pub fn add_field(&mut self, instruction: impl Into<String>, style: TextStyle) {
        self.content.push(InlineContent::Field {
            instruction: instruction.into(),
            style,
        });
    }

    /// Builder form of [`Paragraph::add_run`].
    pub fn with_run(mut self, run: TextRun) -> Self {
        self.add_run(run);
        self
    }

    /// Iterate over the text runs, skipping fields.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Text(run) => Some(run),
            InlineContent::Field { .. } => None,
        })
    }

    /// Mutable iteration over the text runs.
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.content.iter_mut().filter_map(|c| match c {
            InlineContent::Text(run) => Some(run),
            InlineContent::Field { .. } => None,
        })
    }

    /// Number of text runs.
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.runs().map(|run| run.text.as_str()).collect()
    }

    /// True when the paragraph carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.runs().all(|run| run.text.trim().is_empty())
    }

    /// Alignment, if explicitly set.
    pub fn alignment(&self) -> Option<Alignment> {
        self.style.alignment
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// An auto-updating field
    Field {
        /// Field instruction, e.g. `PAGE`
        instruction: String,
        /// Run styling applied to the field result
        style: TextStyle,
    },
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with unset style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text).with_bold(true)
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text).with_italic(true)
    }

    /// Set bold explicitly.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.style.bold = Some(bold);
        self
    }

    /// Set italic explicitly.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.style.italic = Some(italic);
        self
    }

    /// Set underline explicitly.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.style.underline = Some(underline);
        self
    }

    /// Set the font size in points.
    pub fn with_size(mut self, points: f32) -> Self {
        self.style.font_size = Some(points);
        self
    }

    /// Set the font name.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.style.font_name = Some(name.into());
        self
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Run styling properties.
///
/// Flags are tri-state: `None` means the run inherits from its style and
/// must stay unset when copied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: Option<bool>,

    /// Italic text
    pub italic: Option<bool>,

    /// Underlined text
    pub underline: Option<bool>,

    /// Font name
    pub font_name: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,
}

impl TextStyle {
    /// Check if any direct formatting is applied.
    pub fn has_styling(&self) -> bool {
        self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.font_name.is_some()
            || self.font_size.is_some()
    }

    /// True only for an explicit bold.
    pub fn is_bold(&self) -> bool {
        self.bold == Some(true)
    }
}

/// Paragraph styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Text alignment, `None` when inherited
    pub alignment: Option<Alignment>,

    /// Named paragraph style identifier (e.g. `Heading1`)
    pub style_id: Option<String>,

    /// Space before paragraph in points
    pub space_before: Option<f32>,

    /// Space after paragraph in points
    pub space_after: Option<f32>,

    /// Left indent in points
    pub left_indent: Option<f32>,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// Parse a `w:jc` value.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }

    /// The `w:jc` value for this alignment.
    pub fn as_ooxml(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}
