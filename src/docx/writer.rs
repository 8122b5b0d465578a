//! DOCX package writer.
//!
//! Serializes a [`Document`] into a minimal WordprocessingML package.
//! Unset run and paragraph attributes are omitted so they keep inheriting
//! from the style, matching what was read.

use std::io::{Cursor, Write};
use std::path::Path;

use chrono::SecondsFormat;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::detect::MAIN_DOCUMENT_PART;
use crate::error::Result;
use crate::model::{Block, Document, Footer, InlineContent, Metadata, Paragraph, Section, TextStyle};

use super::xml::{
    escape, to_half_points, to_twips, NS_R, NS_W, REL_CORE_PROPERTIES, REL_FOOTER,
    REL_OFFICE_DOCUMENT, REL_STYLES,
};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const FOOTER_PART: &str = "word/footer1.xml";
const FOOTER_REL_ID: &str = "rId2";

/// Write a document to a DOCX file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use versebook::model::{Document, Paragraph};
///
/// let mut doc = Document::new();
/// doc.add_paragraph(Paragraph::with_text("Rosa"));
/// versebook::docx::write_docx(&doc, "output/rosa.docx").unwrap();
/// ```
pub fn write_docx<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let bytes = to_docx_bytes(doc)?;
    std::fs::write(path, bytes)?;
    log::debug!("Wrote {} ({} blocks)", path.display(), doc.blocks.len());
    Ok(())
}

/// Serialize a document into DOCX bytes.
pub fn to_docx_bytes(doc: &Document) -> Result<Vec<u8>> {
    let footer = doc
        .section
        .footer
        .as_ref()
        .filter(|f| !f.paragraphs.is_empty());

    let mut parts: Vec<(&str, String)> = vec![
        ("[Content_Types].xml", content_types_xml(footer.is_some())),
        ("_rels/.rels", package_rels_xml()),
        (MAIN_DOCUMENT_PART, document_xml(doc, footer.is_some())),
        ("word/_rels/document.xml.rels", document_rels_xml(footer.is_some())),
        ("word/styles.xml", styles_xml()),
        ("docProps/core.xml", core_xml(&doc.metadata)),
    ];
    if let Some(footer) = footer {
        parts.push((FOOTER_PART, footer_xml(footer)));
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in &parts {
        zip.start_file(*name, part_options())?;
        zip.write_all(body.as_bytes())?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn part_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

fn content_types_xml(has_footer: bool) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    );
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    );
    xml.push_str(
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    );
    xml.push_str(
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
    );
    if has_footer {
        xml.push_str(
            r#"<Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>"#,
        );
    }
    xml.push_str("</Types>");
    xml
}

fn package_rels_xml() -> String {
    format!(
        r#"{XML_DECLARATION}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{REL_OFFICE_DOCUMENT}" Target="word/document.xml"/><Relationship Id="rId2" Type="{REL_CORE_PROPERTIES}" Target="docProps/core.xml"/></Relationships>"#
    )
}

fn document_rels_xml(has_footer: bool) -> String {
    let mut xml = format!(
        r#"{XML_DECLARATION}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{REL_STYLES}" Target="styles.xml"/>"#
    );
    if has_footer {
        xml.push_str(&format!(
            r#"<Relationship Id="{FOOTER_REL_ID}" Type="{REL_FOOTER}" Target="footer1.xml"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

fn styles_xml() -> String {
    format!(
        r#"{XML_DECLARATION}<w:styles xmlns:w="{NS_W}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style></w:styles>"#
    )
}

fn core_xml(metadata: &Metadata) -> String {
    let mut xml = format!(
        r#"{XML_DECLARATION}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    );
    if let Some(ref title) = metadata.title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape(title)));
    }
    if let Some(ref author) = metadata.author {
        xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape(author)));
    }
    if let Some(created) = metadata.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            created.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    if let Some(modified) = metadata.modified {
        xml.push_str(&format!(
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

fn document_xml(doc: &Document, has_footer: bool) -> String {
    let mut xml = format!(
        r#"{XML_DECLARATION}<w:document xmlns:w="{NS_W}" xmlns:r="{NS_R}"><w:body>"#
    );
    for block in &doc.blocks {
        match block {
            Block::Paragraph(p) => write_paragraph(&mut xml, p),
            Block::PageBreak => xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#),
        }
    }
    write_section(&mut xml, &doc.section, has_footer);
    xml.push_str("</w:body></w:document>");
    xml
}

fn footer_xml(footer: &Footer) -> String {
    let mut xml = format!(r#"{XML_DECLARATION}<w:ftr xmlns:w="{NS_W}" xmlns:r="{NS_R}">"#);
    for p in &footer.paragraphs {
        write_paragraph(&mut xml, p);
    }
    xml.push_str("</w:ftr>");
    xml
}

fn write_section(xml: &mut String, section: &Section, has_footer: bool) {
    xml.push_str("<w:sectPr>");
    if has_footer {
        xml.push_str(&format!(
            r#"<w:footerReference w:type="default" r:id="{FOOTER_REL_ID}"/>"#
        ));
    }
    xml.push_str(&format!(
        r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
        to_twips(section.page_width),
        to_twips(section.page_height)
    ));
    let m = &section.margins;
    xml.push_str(&format!(
        r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="720" w:footer="720" w:gutter="0"/>"#,
        to_twips(m.top),
        to_twips(m.right),
        to_twips(m.bottom),
        to_twips(m.left)
    ));
    xml.push_str("</w:sectPr>");
}

fn write_paragraph(xml: &mut String, p: &Paragraph) {
    xml.push_str("<w:p>");

    let style = &p.style;
    let mut ppr = String::new();
    if let Some(ref id) = style.style_id {
        ppr.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, escape(id)));
    }
    if style.space_before.is_some() || style.space_after.is_some() {
        ppr.push_str("<w:spacing");
        if let Some(before) = style.space_before {
            ppr.push_str(&format!(r#" w:before="{}""#, to_twips(before)));
        }
        if let Some(after) = style.space_after {
            ppr.push_str(&format!(r#" w:after="{}""#, to_twips(after)));
        }
        ppr.push_str("/>");
    }
    if let Some(indent) = style.left_indent {
        ppr.push_str(&format!(r#"<w:ind w:left="{}"/>"#, to_twips(indent)));
    }
    if let Some(alignment) = style.alignment {
        ppr.push_str(&format!(r#"<w:jc w:val="{}"/>"#, alignment.as_ooxml()));
    }
    if !ppr.is_empty() {
        xml.push_str("<w:pPr>");
        xml.push_str(&ppr);
        xml.push_str("</w:pPr>");
    }

    for inline in &p.content {
        match inline {
            InlineContent::Text(run) => {
                xml.push_str("<w:r>");
                write_run_properties(xml, &run.style);
                write_run_text(xml, &run.text);
                xml.push_str("</w:r>");
            }
            InlineContent::Field { instruction, style } => {
                xml.push_str("<w:r>");
                write_run_properties(xml, style);
                xml.push_str(r#"<w:fldChar w:fldCharType="begin"/>"#);
                xml.push_str(&format!(
                    r#"<w:instrText xml:space="preserve">{}</w:instrText>"#,
                    escape(instruction)
                ));
                xml.push_str(r#"<w:fldChar w:fldCharType="end"/>"#);
                xml.push_str("</w:r>");
            }
        }
    }

    xml.push_str("</w:p>");
}

fn write_run_properties(xml: &mut String, style: &TextStyle) {
    if !style.has_styling() {
        return;
    }
    xml.push_str("<w:rPr>");
    if let Some(ref font) = style.font_name {
        let font = escape(font);
        xml.push_str(&format!(
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:cs="{font}"/>"#
        ));
    }
    write_toggle(xml, "w:b", style.bold);
    write_toggle(xml, "w:i", style.italic);
    if let Some(size) = style.font_size {
        xml.push_str(&format!(r#"<w:sz w:val="{}"/>"#, to_half_points(size)));
    }
    match style.underline {
        Some(true) => xml.push_str(r#"<w:u w:val="single"/>"#),
        Some(false) => xml.push_str(r#"<w:u w:val="none"/>"#),
        None => {}
    }
    xml.push_str("</w:rPr>");
}

fn write_toggle(xml: &mut String, tag: &str, value: Option<bool>) {
    match value {
        Some(true) => xml.push_str(&format!("<{tag}/>")),
        Some(false) => xml.push_str(&format!(r#"<{tag} w:val="0"/>"#)),
        None => {}
    }
}

/// Write run text, mapping `\n` and `\t` back to break and tab elements.
fn write_run_text(xml: &mut String, text: &str) {
    let mut segment = String::new();
    for ch in text.chars() {
        match ch {
            '\n' => {
                flush_text(xml, &mut segment);
                xml.push_str("<w:br/>");
            }
            '\t' => {
                flush_text(xml, &mut segment);
                xml.push_str("<w:tab/>");
            }
            _ => segment.push(ch),
        }
    }
    flush_text(xml, &mut segment);
}

fn flush_text(xml: &mut String, segment: &mut String) {
    if segment.is_empty() {
        return;
    }
    xml.push_str(&format!(
        r#"<w:t xml:space="preserve">{}</w:t>"#,
        escape(segment.as_str())
    ));
    segment.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, TextRun};

    #[test]
    fn test_paragraph_xml_omits_unset() {
        let mut xml = String::new();
        write_paragraph(&mut xml, &Paragraph::with_text("Rosa"));
        assert_eq!(
            xml,
            r#"<w:p><w:r><w:t xml:space="preserve">Rosa</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_paragraph_xml_styled() {
        let mut p = Paragraph::aligned(Alignment::Center);
        p.style.space_after = Some(6.0);
        p.add_run(
            TextRun::new("a<b")
                .with_bold(false)
                .with_italic(true)
                .with_size(11.0)
                .with_font("Georgia"),
        );

        let mut xml = String::new();
        write_paragraph(&mut xml, &p);
        assert!(xml.contains(r#"<w:spacing w:after="120"/>"#));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains(r#"<w:b w:val="0"/>"#));
        assert!(xml.contains("<w:i/>"));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert!(xml.contains(r#"w:ascii="Georgia""#));
        assert!(xml.contains("a&lt;b"));
        assert!(!xml.contains("<w:u"));
    }

    #[test]
    fn test_run_text_breaks_and_tabs() {
        let mut xml = String::new();
        write_run_text(&mut xml, "a\nb\tc");
        assert_eq!(
            xml,
            r#"<w:t xml:space="preserve">a</w:t><w:br/><w:t xml:space="preserve">b</w:t><w:tab/><w:t xml:space="preserve">c</w:t>"#
        );
    }

    #[test]
    fn test_page_break_and_footer_reference() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("x"));
        doc.add_page_break();
        let xml = document_xml(&doc, true);
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
        assert!(xml.contains(r#"r:id="rId2""#));
        assert!(xml.contains(r#"w:left="1440""#));
    }

    #[test]
    fn test_core_xml_escapes() {
        let meta = Metadata {
            title: Some("Sol & Mar".into()),
            ..Default::default()
        };
        let xml = core_xml(&meta);
        assert!(xml.contains("<dc:title>Sol &amp; Mar</dc:title>"));
        assert!(!xml.contains("dc:creator"));
    }
}
