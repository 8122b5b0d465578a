//! Section page setup and footer.

use super::{Alignment, Paragraph, TextStyle};
use serde::{Deserialize, Serialize};

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Page setup for a document section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Page width in points
    pub page_width: f32,

    /// Page height in points
    pub page_height: f32,

    /// Page margins
    pub margins: Margins,

    /// Default footer shown on every page of the section
    pub footer: Option<Footer>,
}

impl Section {
    /// Letter-sized section with one-inch margins.
    pub fn letter() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margins: Margins::default(),
            footer: None,
        }
    }

    /// Replace the margins.
    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::letter()
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
    /// Right margin
    pub right: f32,
}

impl Margins {
    /// Build margins from inch values.
    pub fn inches(top: f32, bottom: f32, left: f32, right: f32) -> Self {
        Self {
            top: top * POINTS_PER_INCH,
            bottom: bottom * POINTS_PER_INCH,
            left: left * POINTS_PER_INCH,
            right: right * POINTS_PER_INCH,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::inches(1.0, 1.0, 1.0, 1.0)
    }
}

/// Section footer content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    /// Footer paragraphs
    pub paragraphs: Vec<Paragraph>,
}

impl Footer {
    /// A footer holding one centered, auto-incrementing page number.
    pub fn page_numbers(font_size: f32) -> Self {
        let mut footer = Self::default();
        footer.add_page_number(font_size);
        footer
    }

    /// First footer paragraph, created on demand.
    pub fn first_paragraph_mut(&mut self) -> &mut Paragraph {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::new());
        }
        &mut self.paragraphs[0]
    }

    /// Center the first paragraph and append a `PAGE` field to it.
    pub fn add_page_number(&mut self, font_size: f32) {
        let para = self.first_paragraph_mut();
        para.style.alignment = Some(Alignment::Center);
        para.add_field(
            "PAGE",
            TextStyle {
                font_size: Some(font_size),
                ..Default::default()
            },
        );
    }

    /// Check whether any paragraph contains a `PAGE` field.
    pub fn has_page_number(&self) -> bool {
        self.paragraphs.iter().any(|p| {
            p.content.iter().any(|c| {
                matches!(c, super::InlineContent::Field { instruction, .. }
                    if instruction.split_whitespace().next() == Some("PAGE"))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_inches() {
        let m = Margins::inches(1.0, 1.0, 1.25, 1.25);
        assert_eq!(m.top, 72.0);
        assert_eq!(m.left, 90.0);
    }

    #[test]
    fn test_footer_page_numbers() {
        let footer = Footer::page_numbers(10.0);
        assert!(footer.has_page_number());
        assert_eq!(footer.paragraphs.len(), 1);
        assert_eq!(
            footer.paragraphs[0].alignment(),
            Some(Alignment::Center)
        );
    }
}
