//! Poetry book restructuring.
//!
//! The restructurer reads a consolidated document, recovers the poems from
//! the collector's title blocks and lays them out as a book: a title page,
//! an index of poem titles, one centered section per poem and a running
//! page number in the footer.
//!
//! # Example
//!
//! ```no_run
//! use versebook::book::{BookOptions, Restructurer};
//!
//! fn main() -> versebook::Result<()> {
//!     let options = BookOptions::new().with_author("Cecília");
//!     let outcome = Restructurer::new(options)
//!         .run("output/consolidado.docx", "output/livro_de_poemas.docx")?;
//!     println!("{} poems", outcome.report.stats.poem_count);
//!     Ok(())
//! }
//! ```

mod detect;
mod json;
mod options;
mod render;
mod segment;
mod stats;

pub use detect::{clean_title, is_title_marker, MIN_MARKER_SIZE};
pub use json::{poems_to_json, summarize, JsonFormat, PoemSummary};
pub use options::{BookOptions, BookTemplate, DEFAULT_BOOK_TITLE};
pub use render::render_book;
pub use segment::{segment, Poem, Segmenter};
pub use stats::BookStats;

use std::path::{Path, PathBuf};

use crate::docx::{read_docx, write_docx};
use crate::error::Result;
use crate::model::Document;

/// Result of restructuring one document.
#[derive(Debug, Clone)]
pub struct BookReport {
    /// The formatted book
    pub document: Document,
    /// Poems in book order
    pub poems: Vec<Poem>,
    /// Counts for reporting
    pub stats: BookStats,
}

impl BookReport {
    /// Poem titles in index order.
    pub fn titles(&self) -> Vec<&str> {
        self.poems.iter().map(|p| p.title.as_str()).collect()
    }
}

/// Result of [`Restructurer::run`].
#[derive(Debug, Clone)]
pub struct BookOutcome {
    /// Where the book was written
    pub path: PathBuf,
    /// Restructuring details
    pub report: BookReport,
}

/// Turns a consolidated document into a poetry book.
#[derive(Debug, Clone, Default)]
pub struct Restructurer {
    options: BookOptions,
}

impl Restructurer {
    /// Create a restructurer with the given options.
    pub fn new(options: BookOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &BookOptions {
        &self.options
    }

    /// Recover the poems of a consolidated document.
    pub fn poems(&self, source: &Document) -> (Vec<Poem>, usize) {
        let mut segmenter = Segmenter::new(&self.options.marker_tag);
        for block in source.blocks() {
            segmenter.push(block);
        }
        let discarded = segmenter.discarded();
        (segmenter.finish(), discarded)
    }

    /// Read a consolidated document and recover its poems.
    pub fn read_poems(&self, input: impl AsRef<Path>) -> Result<Vec<Poem>> {
        let source = read_docx(input)?;
        Ok(self.poems(&source).0)
    }

    /// Build the book for an in-memory consolidated document.
    pub fn restructure(&self, source: &Document) -> BookReport {
        let (poems, discarded) = self.poems(source);
        if poems.is_empty() {
            log::warn!("No title markers found; the book will have an empty index");
        } else {
            log::info!("Found {} poems", poems.len());
        }
        if discarded > 0 {
            log::debug!("{} paragraphs before the first title were skipped", discarded);
        }

        let mut stats = BookStats::from_poems(&poems);
        stats.discarded_count = discarded as u32;

        let document = render_book(&poems, &self.options);
        BookReport {
            document,
            poems,
            stats,
        }
    }

    /// Read `input`, restructure it and write the book to `output`.
    ///
    /// Any read or write failure aborts the run.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<BookOutcome> {
        let input = input.as_ref();
        let output = output.as_ref();

        log::info!("Reading consolidated document: {}", input.display());
        let source = read_docx(input)?;
        let report = self.restructure(&source);

        write_docx(&report.document, output)?;
        log::info!(
            "Poetry book with {} poems written to {}",
            report.stats.poem_count,
            output.display()
        );

        Ok(BookOutcome {
            path: output.to_path_buf(),
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Alignment, Paragraph, TextRun};

    fn consolidated() -> Document {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("antes"));
        for (name, line) in [("A.docx", "Rosa"), ("B.docx", "Lua")] {
            if doc.paragraph_count() > 1 {
                doc.add_page_break();
            }
            doc.add_paragraph(
                Paragraph::aligned(Alignment::Center)
                    .with_run(TextRun::bold(name).with_size(14.0)),
            );
            doc.add_blank_paragraph();
            doc.add_paragraph(Paragraph::with_text(line));
        }
        doc
    }

    #[test]
    fn test_restructure_report() {
        let report = Restructurer::default().restructure(&consolidated());
        assert_eq!(report.titles(), vec!["A", "B"]);
        assert_eq!(report.stats.poem_count, 2);
        assert_eq!(report.stats.discarded_count, 1);
        assert!(report.document.section().footer.is_some());
    }

    #[test]
    fn test_restructure_without_markers() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("nada"));
        let report = Restructurer::default().restructure(&doc);
        assert!(report.poems.is_empty());
        // title page and index pages only
        assert_eq!(report.document.page_break_count(), 2);
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = Restructurer::default().run(
            dir.path().join("missing.docx"),
            dir.path().join("out.docx"),
        );
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(!dir.path().join("out.docx").exists());
    }

    #[test]
    fn test_run_writes_book() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("consolidado.docx");
        write_docx(&consolidated(), &input).unwrap();

        let output = dir.path().join("livro").join("livro.docx");
        let outcome = Restructurer::default().run(&input, &output).unwrap();
        assert_eq!(outcome.path, output);
        assert!(output.exists());

        let book = read_docx(&output).unwrap();
        assert!(book.paragraphs().any(|p| p.plain_text() == "Rosa"));
        assert!(book.section().footer.as_ref().unwrap().has_page_number());
    }
}
