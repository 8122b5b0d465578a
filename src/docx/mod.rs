//! DOCX reading and writing.
//!
//! The pipeline only needs a narrow slice of WordprocessingML: body
//! paragraphs with their runs, explicit page breaks, section margins and a
//! default footer. Everything else in a source package is ignored on read.

mod reader;
mod writer;
mod xml;

pub use reader::{read_docx, read_docx_bytes};
pub use writer::{to_docx_bytes, write_docx};

/// Extension of the documents this crate reads and writes.
pub const DOCX_EXTENSION: &str = ".docx";
