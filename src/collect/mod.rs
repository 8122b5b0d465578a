//! Consolidation of many source documents into one.
//!
//! The collector reads every source in file-name order and folds its
//! paragraphs into a single document. Each source is introduced by a title
//! block carrying its file name, which the restructurer later uses to find
//! where one poem ends and the next begins.
//!
//! # Example
//!
//! ```no_run
//! use versebook::collect::{CollectOptions, Collector};
//!
//! fn main() -> versebook::Result<()> {
//!     let options = CollectOptions::new().with_input_dir("poemas");
//!     let outcome = Collector::new(options).run()?;
//!     println!("{} -> {}", outcome.report.consolidated.len(), outcome.path.display());
//!     Ok(())
//! }
//! ```

mod discover;
mod options;

pub use discover::{discover_sources, SourceFile};
pub use options::{CollectOptions, DEFAULT_TITLE_SIZE};

use std::path::PathBuf;

use chrono::Utc;

use crate::copy::copy_paragraph;
use crate::docx::{read_docx, write_docx};
use crate::error::{Error, Result};
use crate::model::{Alignment, Block, Document, Paragraph, TextRun};

/// Progress notifications emitted while collecting.
#[derive(Debug)]
pub enum CollectEvent<'a> {
    /// A source is about to be read
    Started {
        /// The source
        source: &'a SourceFile,
        /// Number of sources in this run
        total: usize,
    },
    /// A source was appended to the output
    Consolidated {
        /// The source
        source: &'a SourceFile,
        /// Paragraphs copied from it
        paragraphs: usize,
    },
    /// A source failed to read and was skipped
    Skipped {
        /// The source
        source: &'a SourceFile,
        /// Why it was skipped
        error: &'a Error,
    },
}

/// A source that could not be consolidated.
#[derive(Debug)]
pub struct FileFailure {
    /// The failing source
    pub source: SourceFile,
    /// The per-file error ([`Error::FileRead`])
    pub error: Error,
}

/// Result of folding the sources into one document.
#[derive(Debug)]
pub struct CollectReport {
    /// The consolidated document
    pub document: Document,
    /// File names that made it into the document, in order
    pub consolidated: Vec<String>,
    /// Sources that were skipped
    pub failures: Vec<FileFailure>,
}

impl CollectReport {
    /// Number of sources that were attempted.
    pub fn attempted(&self) -> usize {
        self.consolidated.len() + self.failures.len()
    }
}

/// Result of [`Collector::run`].
#[derive(Debug)]
pub struct CollectOutcome {
    /// Where the consolidated document was written
    pub path: PathBuf,
    /// Collection details
    pub report: CollectReport,
}

/// Folds source documents into one consolidated document.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    options: CollectOptions,
}

impl Collector {
    /// Create a collector with the given options.
    pub fn new(options: CollectOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &CollectOptions {
        &self.options
    }

    /// Discover the sources in the configured input folder.
    pub fn discover(&self) -> Result<Vec<SourceFile>> {
        discover_sources(&self.options.input_dir, &self.options.extension)
    }

    /// Consolidate `sources` in the given order.
    pub fn collect(&self, sources: &[SourceFile]) -> Result<CollectReport> {
        self.collect_with(sources, |_| {})
    }

    /// Consolidate `sources`, reporting progress to `observer`.
    ///
    /// A source that fails to read is skipped; the run only fails when no
    /// source could be consolidated at all.
    pub fn collect_with<F>(&self, sources: &[SourceFile], mut observer: F) -> Result<CollectReport>
    where
        F: FnMut(CollectEvent<'_>),
    {
        let mut document = Document::new();
        let mut consolidated = Vec::new();
        let mut failures = Vec::new();

        for (idx, source) in sources.iter().enumerate() {
            observer(CollectEvent::Started {
                source,
                total: sources.len(),
            });
            log::info!(
                "Processing [{}/{}]: {}",
                idx + 1,
                sources.len(),
                source.name
            );

            let content = match read_docx(&source.path) {
                Ok(content) => content,
                Err(e) => {
                    let error = Error::FileRead {
                        name: source.name.clone(),
                        message: e.to_string(),
                    };
                    log::warn!("{}; continuing with the next file", error);
                    observer(CollectEvent::Skipped {
                        source,
                        error: &error,
                    });
                    failures.push(FileFailure {
                        source: source.clone(),
                        error,
                    });
                    continue;
                }
            };

            // Break between consecutive consolidated files only.
            if !consolidated.is_empty() {
                document.add_page_break();
            }
            if self.options.add_titles {
                self.append_title_block(&mut document, &source.name);
            }
            let paragraphs = append_content(&mut document, &content);

            observer(CollectEvent::Consolidated { source, paragraphs });
            consolidated.push(source.name.clone());
        }

        if consolidated.is_empty() {
            return Err(Error::NothingCollected {
                failed: failures.len(),
            });
        }

        document.metadata.created = Some(Utc::now());
        Ok(CollectReport {
            document,
            consolidated,
            failures,
        })
    }

    /// Discover, consolidate and write the output document.
    pub fn run(&self) -> Result<CollectOutcome> {
        let sources = self.discover()?;
        self.run_sources(&sources)
    }

    /// Consolidate already discovered sources and write the output document.
    pub fn run_sources(&self, sources: &[SourceFile]) -> Result<CollectOutcome> {
        let report = self.collect(sources)?;
        let path = self.write(&report)?;
        Ok(CollectOutcome { path, report })
    }

    /// Write a collected document to the configured output path.
    pub fn write(&self, report: &CollectReport) -> Result<PathBuf> {
        let path = self.options.output_path();
        write_docx(&report.document, &path)?;
        log::info!(
            "Consolidated {} of {} documents into {}",
            report.consolidated.len(),
            report.attempted(),
            path.display()
        );
        Ok(path)
    }

    fn append_title_block(&self, document: &mut Document, file_name: &str) {
        let title = Paragraph::aligned(Alignment::Center).with_run(
            TextRun::bold(file_name).with_size(self.options.title_size),
        );
        document.add_paragraph(title);
        document.add_blank_paragraph();
    }
}

/// Copy every block of `source` into `target`; returns the paragraph count.
///
/// Page breaks inside a source become blank lines, so the only breaks in
/// the output are the ones separating files.
fn append_content(target: &mut Document, source: &Document) -> usize {
    for block in source.blocks() {
        match block {
            Block::Paragraph(p) => {
                copy_paragraph(p, target);
            }
            Block::PageBreak => target.add_blank_paragraph(),
        }
    }
    source.blocks().len()
}
