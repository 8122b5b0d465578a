//! Source document discovery.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

/// One input document found by [`discover_sources`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Full path to the document
    pub path: PathBuf,

    /// File name including extension, used as the title marker text
    pub name: String,

    /// 1-based rank in file-name order
    pub ordinal: usize,
}

impl SourceFile {
    /// Create a source file from a path.
    pub fn new(path: impl Into<PathBuf>, ordinal: usize) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            name,
            ordinal,
        }
    }
}

/// List the documents in `dir` whose file name ends with `extension`.
///
/// Only regular files are returned, sorted by file name in codepoint order
/// (so `B.docx` sorts before `a.docx`).
///
/// # Errors
///
/// * [`Error::NotFound`] if `dir` does not exist
/// * [`Error::EmptyInput`] if no file matches
pub fn discover_sources(dir: &Path, extension: &str) -> Result<Vec<SourceFile>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(dir.to_path_buf()));
    }

    let mut matches: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non UTF-8 file name: {}", path.display());
            continue;
        };
        if name.ends_with(extension) {
            matches.push((name.to_string(), path));
        }
    }

    if matches.is_empty() {
        return Err(Error::EmptyInput {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    matches.sort_by(|a, b| a.0.cmp(&b.0));

    let sources: Vec<SourceFile> = matches
        .into_iter()
        .enumerate()
        .map(|(idx, (name, path))| SourceFile {
            path,
            name,
            ordinal: idx + 1,
        })
        .collect();

    log::info!(
        "Found {} {} files in {}",
        sources.len(),
        extension,
        dir.display()
    );
    Ok(sources)
}
