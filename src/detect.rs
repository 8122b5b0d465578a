//! DOCX package detection.

use crate::error::{Error, Result};

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Main document part every WordprocessingML package carries.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";

/// Check the container signature of DOCX bytes.
///
/// # Returns
/// * `Ok(())` if the data starts with a ZIP local file header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<()> {
    if data.len() < ZIP_MAGIC.len() || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip_magic() {
        assert!(detect_format_from_bytes(b"PK\x03\x04rest").is_ok());
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"%PDF-1.7");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        let result = detect_format_from_bytes(b"PK");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
