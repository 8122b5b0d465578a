//! Restructurer configuration and the fixed book template.

use crate::docx::DOCX_EXTENSION;
use crate::model::Margins;

/// Default book title, also used as the title page subtitle.
pub const DEFAULT_BOOK_TITLE: &str = "Coletânea de Poemas";

/// Options for turning a consolidated document into a poetry book.
#[derive(Debug, Clone)]
pub struct BookOptions {
    /// Title shown on the title page
    pub book_title: String,

    /// Author line on the title page; omitted when empty
    pub author: String,

    /// Text a title marker paragraph must contain; stripped from the title
    pub marker_tag: String,

    /// Fonts, sizes and fixed literals of the rendered book
    pub template: BookTemplate,
}

impl BookOptions {
    /// Create new book options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the book title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.book_title = title.into();
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Set the title marker tag.
    pub fn with_marker_tag(mut self, tag: impl Into<String>) -> Self {
        self.marker_tag = tag.into();
        self
    }

    /// Replace the template.
    pub fn with_template(mut self, template: BookTemplate) -> Self {
        self.template = template;
        self
    }

    /// Check whether an author line will be rendered.
    pub fn has_author(&self) -> bool {
        !self.author.is_empty()
    }
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            book_title: DEFAULT_BOOK_TITLE.to_string(),
            author: String::new(),
            marker_tag: DOCX_EXTENSION.to_string(),
            template: BookTemplate::default(),
        }
    }
}

/// Layout of the rendered book.
///
/// Sizes are in points, indents in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct BookTemplate {
    /// Font forced onto every poem body run
    pub body_font: String,
    /// Body run size
    pub body_size: f32,
    /// Space after each non-blank body line
    pub body_space_after: f32,
    /// Font of the title page, index, poem titles and separator
    pub heading_font: String,

    /// Title page: book title size
    pub title_size: f32,
    /// Title page: subtitle text
    pub subtitle: String,
    /// Title page: subtitle size
    pub subtitle_size: f32,
    /// Title page: author size
    pub author_size: f32,
    /// Blank lines above the book title
    pub blanks_before_title: usize,
    /// Blank lines between title and subtitle
    pub blanks_before_subtitle: usize,
    /// Blank lines between subtitle and author
    pub blanks_before_author: usize,

    /// Index heading text
    pub index_heading: String,
    /// Index heading size
    pub index_heading_size: f32,
    /// Index entry size
    pub index_entry_size: f32,
    /// Index entry left indent
    pub index_indent: f32,

    /// Poem title size
    pub poem_title_size: f32,
    /// Ornament under each poem title
    pub separator: String,
    /// Ornament size
    pub separator_size: f32,

    /// Footer page number size
    pub page_number_size: f32,

    /// Page margins
    pub margins: Margins,
}

impl Default for BookTemplate {
    fn default() -> Self {
        Self {
            body_font: "Georgia".to_string(),
            body_size: 11.0,
            body_space_after: 6.0,
            heading_font: "Georgia".to_string(),
            title_size: 24.0,
            subtitle: DEFAULT_BOOK_TITLE.to_string(),
            subtitle_size: 14.0,
            author_size: 16.0,
            blanks_before_title: 8,
            blanks_before_subtitle: 3,
            blanks_before_author: 5,
            index_heading: "ÍNDICE".to_string(),
            index_heading_size: 18.0,
            index_entry_size: 11.0,
            index_indent: 0.5,
            poem_title_size: 14.0,
            separator: "• • •".to_string(),
            separator_size: 10.0,
            page_number_size: 10.0,
            margins: Margins::inches(1.0, 1.0, 1.25, 1.25),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_options_builder() {
        let options = BookOptions::new()
            .with_title("Versos")
            .with_author("Ana")
            .with_marker_tag(".odt");

        assert_eq!(options.book_title, "Versos");
        assert!(options.has_author());
        assert_eq!(options.marker_tag, ".odt");
    }

    #[test]
    fn test_default_book_options() {
        let options = BookOptions::default();
        assert_eq!(options.book_title, "Coletânea de Poemas");
        assert!(!options.has_author());
        assert_eq!(options.marker_tag, ".docx");
        assert_eq!(options.template.body_font, "Georgia");
        assert_eq!(options.template.heading_font, "Georgia");
        assert_eq!(options.template.margins.left, 90.0);
    }
}
