//! Collector configuration.

use std::path::PathBuf;

use crate::docx::DOCX_EXTENSION;

/// Default title-block font size in points.
pub const DEFAULT_TITLE_SIZE: f32 = 14.0;

/// Options for consolidating a folder of documents.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Folder scanned for source documents
    pub input_dir: PathBuf,

    /// Folder the consolidated document is written to
    pub output_dir: PathBuf,

    /// File name of the consolidated document
    pub output_filename: String,

    /// Insert a title block with the file name before each source
    pub add_titles: bool,

    /// File-name suffix of source documents
    pub extension: String,

    /// Title block font size in points
    pub title_size: f32,
}

impl CollectOptions {
    /// Create new collect options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input folder.
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the output folder.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the output file name.
    pub fn with_output_filename(mut self, name: impl Into<String>) -> Self {
        self.output_filename = name.into();
        self
    }

    /// Enable or disable title blocks.
    pub fn with_titles(mut self, add_titles: bool) -> Self {
        self.add_titles = add_titles;
        self
    }

    /// Set the source file extension (including the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Full path of the consolidated document.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            output_filename: "consolidado.docx".to_string(),
            add_titles: true,
            extension: DOCX_EXTENSION.to_string(),
            title_size: DEFAULT_TITLE_SIZE,
        }
    }
}
