//! Small WordprocessingML helpers shared by the reader and writer.

use quick_xml::events::BytesStart;
use std::borrow::Cow;

pub(crate) const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub(crate) const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub(crate) const REL_FOOTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";

/// Extract an attribute value by qualified name.
pub(crate) fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// The `w:val` attribute.
pub(crate) fn val(e: &BytesStart<'_>) -> Option<String> {
    attr(e, b"w:val")
}

/// Read an on/off property such as `<w:b/>` or `<w:i w:val="0"/>`.
pub(crate) fn on_off(e: &BytesStart<'_>) -> bool {
    !matches!(val(e).as_deref(), Some("0" | "false" | "off"))
}

/// Parse a twentieths-of-a-point attribute into points.
pub(crate) fn twips_attr(e: &BytesStart<'_>, key: &[u8]) -> Option<f32> {
    attr(e, key)
        .and_then(|v| v.parse::<f32>().ok())
        .map(|twips| twips / 20.0)
}

/// Points to twentieths of a point.
pub(crate) fn to_twips(points: f32) -> i64 {
    (points * 20.0).round() as i64
}

/// Points to half-points (`w:sz`).
pub(crate) fn to_half_points(points: f32) -> u32 {
    (points * 2.0).round().max(1.0) as u32
}

/// Escape text or attribute content.
pub(crate) fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversions() {
        assert_eq!(to_twips(72.0), 1440);
        assert_eq!(to_twips(90.0), 1800);
        assert_eq!(to_half_points(11.0), 22);
        assert_eq!(to_half_points(10.5), 21);
    }

    #[test]
    fn test_on_off() {
        let on = BytesStart::new("w:b");
        assert!(on_off(&on));

        let off = BytesStart::from_content(r#"w:b w:val="0""#, 3);
        assert!(!on_off(&off));

        let explicit = BytesStart::from_content(r#"w:b w:val="true""#, 3);
        assert!(on_off(&explicit));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Rosa & Lua <3"), "Rosa &amp; Lua &lt;3");
    }
}
