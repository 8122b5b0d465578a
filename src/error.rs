//! Error types for versebook library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for versebook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while collecting or formatting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// Input folder or input document does not exist.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Input folder exists but holds no matching documents.
    #[error("No {extension} files found in: {}", .dir.display())]
    EmptyInput {
        /// Folder that was scanned
        dir: PathBuf,
        /// Extension that was searched for
        extension: String,
    },

    /// One source document could not be read during collection.
    #[error("Error processing {name}: {message}")]
    FileRead {
        /// File name of the failing source
        name: String,
        /// Underlying failure
        message: String,
    },

    /// Every discovered source document failed to read.
    #[error("No documents could be consolidated ({failed} failed)")]
    NothingCollected {
        /// Number of files that failed
        failed: usize,
    },

    /// The file is not a DOCX (ZIP) package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing the ZIP container.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Malformed WordprocessingML.
    #[error("XML error: {0}")]
    Xml(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the error only affects a single source file.
    ///
    /// The collector skips recoverable errors and keeps going; everything
    /// else aborts the running stage.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::FileRead { .. })
    }

    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Error::Xml(err.to_string())
    }
}
