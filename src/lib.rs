//! # versebook
//!
//! Turn a folder of Word documents, one poem per file, into a formatted
//! poetry book.
//!
//! The work happens in two stages:
//!
//! 1. The [`Collector`] merges every `.docx` in a folder into one
//!    consolidated document, introducing each file with a title block and
//!    separating files with page breaks.
//! 2. The [`Restructurer`] finds those title blocks again, recovers the
//!    poems and renders a book with a title page, an index, one centered
//!    section per poem and page numbers in the footer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use versebook::{collect_folder, format_poetry_book};
//!
//! fn main() -> versebook::Result<()> {
//!     let consolidated = collect_folder("input", "output")?;
//!     let book = format_poetry_book(&consolidated, "output/livro_de_poemas.docx")?;
//!     println!("{} poems", book.report.stats.poem_count);
//!     Ok(())
//! }
//! ```

pub mod book;
pub mod collect;
pub mod copy;
pub mod detect;
pub mod docx;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use book::{BookOptions, BookOutcome, BookReport, BookStats, BookTemplate, Poem, Restructurer};
pub use collect::{
    CollectEvent, CollectOptions, CollectOutcome, CollectReport, Collector, SourceFile,
};
pub use detect::detect_format_from_bytes;
pub use docx::{read_docx, read_docx_bytes, to_docx_bytes, write_docx};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, Document, Footer, InlineContent, Margins, Metadata, Paragraph,
    ParagraphStyle, Section, TextRun, TextStyle,
};

use std::path::{Path, PathBuf};

/// Default file name of the formatted book.
pub const DEFAULT_BOOK_FILENAME: &str = "livro_de_poemas.docx";

/// Merge every `.docx` in `input_dir` into `output_dir/consolidado.docx`.
///
/// Returns the path of the consolidated document.
///
/// # Example
///
/// ```no_run
/// use versebook::collect_folder;
///
/// let path = collect_folder("poemas", "saida").unwrap();
/// println!("{}", path.display());
/// ```
pub fn collect_folder<P: AsRef<Path>, Q: AsRef<Path>>(input_dir: P, output_dir: Q) -> Result<PathBuf> {
    let options = CollectOptions::new()
        .with_input_dir(input_dir.as_ref())
        .with_output_dir(output_dir.as_ref());
    Collector::new(options).run().map(|outcome| outcome.path)
}

/// Format a consolidated document as a poetry book with default options.
///
/// # Example
///
/// ```no_run
/// use versebook::format_poetry_book;
///
/// let outcome = format_poetry_book("output/consolidado.docx", "output/livro.docx").unwrap();
/// println!("{:?}", outcome.report.titles());
/// ```
pub fn format_poetry_book<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<BookOutcome> {
    Restructurer::default().run(input, output)
}

/// Builder running both stages in sequence.
///
/// # Example
///
/// ```no_run
/// use versebook::Pipeline;
///
/// let outcome = Pipeline::new()
///     .with_input_dir("poemas")
///     .with_output_dir("saida")
///     .with_title("Versos de Inverno")
///     .with_author("Cecília")
///     .run()?;
/// println!("{}", outcome.book.path.display());
/// # Ok::<(), versebook::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    collect_options: CollectOptions,
    book_options: BookOptions,
    book_filename: String,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn new() -> Self {
        Self {
            collect_options: CollectOptions::default(),
            book_options: BookOptions::default(),
            book_filename: DEFAULT_BOOK_FILENAME.to_string(),
        }
    }

    /// Set the folder scanned for source documents.
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.collect_options = self.collect_options.with_input_dir(dir);
        self
    }

    /// Set the folder both outputs are written to.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.collect_options = self.collect_options.with_output_dir(dir);
        self
    }

    /// Set the consolidated document's file name.
    pub fn with_consolidated_filename(mut self, name: impl Into<String>) -> Self {
        self.collect_options = self.collect_options.with_output_filename(name);
        self
    }

    /// Set the book's file name.
    pub fn with_book_filename(mut self, name: impl Into<String>) -> Self {
        self.book_filename = name.into();
        self
    }

    /// Set the book title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.book_options = self.book_options.with_title(title);
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.book_options = self.book_options.with_author(author);
        self
    }

    /// Replace the collector options.
    pub fn with_collect_options(mut self, options: CollectOptions) -> Self {
        self.collect_options = options;
        self
    }

    /// Replace the book options.
    pub fn with_book_options(mut self, options: BookOptions) -> Self {
        self.book_options = options;
        self
    }

    /// Path the book will be written to.
    pub fn book_path(&self) -> PathBuf {
        self.collect_options.output_dir.join(&self.book_filename)
    }

    /// Collect the folder, then format the consolidated document.
    ///
    /// The restructurer only runs after a successful collection.
    pub fn run(&self) -> Result<PipelineOutcome> {
        self.run_with(|_| {})
    }

    /// Like [`Pipeline::run`], reporting collection progress to `observer`.
    pub fn run_with<F>(&self, observer: F) -> Result<PipelineOutcome>
    where
        F: FnMut(CollectEvent<'_>),
    {
        let collector = Collector::new(self.collect_options.clone());
        let sources = collector.discover()?;
        let report = collector.collect_with(&sources, observer)?;
        let path = collector.write(&report)?;
        let collected = CollectOutcome { path, report };

        let book = Restructurer::new(self.book_options.clone())
            .run(&collected.path, self.book_path())?;

        Ok(PipelineOutcome { collected, book })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of running both stages.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Collector stage result
    pub collected: CollectOutcome,
    /// Restructurer stage result
    pub book: BookOutcome,
}
