//! DOCX package reader.
//!
//! Walks `word/document.xml` with quick-xml and builds the paragraph/run
//! tree. Only top-level body paragraphs are read; tables, drawings and
//! text boxes are skipped.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::{detect_format_from_bytes, MAIN_DOCUMENT_PART};
use crate::error::{Error, Result};
use crate::model::{
    Alignment, Block, Document, Footer, InlineContent, Margins, Metadata, Paragraph, Section,
    TextRun, TextStyle,
};

use super::xml::{attr, on_off, twips_attr, val};

const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const CORE_PART: &str = "docProps/core.xml";

/// Elements whose whole subtree is ignored.
const SKIPPED_ELEMENTS: &[&[u8]] = &[
    b"w:tbl",
    b"w:drawing",
    b"w:pict",
    b"w:object",
    b"w:txbxContent",
    b"mc:AlternateContent",
];

/// Read a DOCX file from disk.
///
/// # Example
///
/// ```no_run
/// let doc = versebook::docx::read_docx("poem.docx").unwrap();
/// for p in doc.paragraphs() {
///     println!("{}", p.plain_text());
/// }
/// ```
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let data = std::fs::read(path)?;
    read_docx_bytes(&data)
}

/// Read a DOCX package from memory.
pub fn read_docx_bytes(data: &[u8]) -> Result<Document> {
    detect_format_from_bytes(data)?;
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let document_xml = read_part(&mut archive, MAIN_DOCUMENT_PART)?
        .ok_or_else(|| Error::MissingPart(MAIN_DOCUMENT_PART.to_string()))?;
    let body = walk_xml(&document_xml)?;

    let mut section = body.section;
    if let Some(rel_id) = body.footer_rel {
        section.footer = read_footer(&mut archive, &rel_id)?;
    }

    let metadata = match read_part(&mut archive, CORE_PART)? {
        Some(xml) => parse_core_properties(&xml)?,
        None => Metadata::default(),
    };

    log::debug!(
        "Read DOCX: {} blocks, footer: {}",
        body.blocks.len(),
        section.footer.is_some()
    );

    Ok(Document {
        metadata,
        blocks: body.blocks,
        section,
    })
}

fn read_part<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}

fn read_footer<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    rel_id: &str,
) -> Result<Option<Footer>> {
    let Some(rels_xml) = read_part(archive, DOCUMENT_RELS_PART)? else {
        return Ok(None);
    };
    let relationships = parse_relationships(&rels_xml)?;
    let Some(target) = relationships.get(rel_id) else {
        log::warn!("Footer relationship {} has no target", rel_id);
        return Ok(None);
    };

    let part_name = resolve_target(target);
    let Some(footer_xml) = read_part(archive, &part_name)? else {
        log::warn!("Footer part {} is missing", part_name);
        return Ok(None);
    };

    let walked = walk_xml(&footer_xml)?;
    Ok(Some(Footer {
        paragraphs: walked
            .blocks
            .into_iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p),
                Block::PageBreak => None,
            })
            .collect(),
    }))
}

/// Relationship targets in `document.xml.rels` are relative to `word/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("word/{}", target),
    }
}

/// Parse a relationships part into an `Id -> Target` map.
pub(crate) fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut relationships = HashMap::new();
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event().map_err(Error::xml)? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr(&e, b"Id"), attr(&e, b"Target")) {
                    relationships.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(relationships)
}

fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut metadata = Metadata::default();
    let mut reader = Reader::from_str(xml);
    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader.read_event().map_err(Error::xml)? {
            Event::Start(e) => current = Some(e.name().as_ref().to_vec()),
            Event::End(_) => current = None,
            Event::Text(t) => {
                let text = t.unescape().map_err(Error::xml)?.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                match current.as_deref() {
                    Some(b"dc:title") => metadata.title = Some(text),
                    Some(b"dc:creator") => metadata.author = Some(text),
                    Some(b"dcterms:created") => metadata.created = parse_w3cdtf(&text),
                    Some(b"dcterms:modified") => metadata.modified = parse_w3cdtf(&text),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}

fn parse_w3cdtf(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Result of walking a document or footer part.
#[derive(Debug, Default)]
struct WalkedPart {
    blocks: Vec<Block>,
    section: Section,
    footer_rel: Option<String>,
}

#[derive(Debug, Default)]
struct OpenParagraph {
    paragraph: Paragraph,
    /// Page break seen before any text
    break_before: bool,
    /// Page break seen after text
    break_after: bool,
}

impl OpenParagraph {
    fn has_text(&self) -> bool {
        self.paragraph.runs().any(|r| !r.text.is_empty())
    }

    fn note_page_break(&mut self, run_has_text: bool) {
        if self.has_text() || run_has_text {
            self.break_after = true;
        } else {
            self.break_before = true;
        }
    }
}

#[derive(Debug, Default)]
struct OpenRun {
    text: String,
    style: TextStyle,
    instruction: Option<String>,
    /// Run carried only breaks or field characters
    structural: bool,
}

/// Event-driven walker over a WordprocessingML part.
#[derive(Debug, Default)]
struct BodyWalker {
    part: WalkedPart,
    paragraph: Option<OpenParagraph>,
    run: Option<OpenRun>,
    in_ppr: bool,
    in_rpr: bool,
    in_text: bool,
    in_instr: bool,
    in_sect_pr: bool,
    skip_depth: usize,
}

impl BodyWalker {
    fn start(&mut self, e: &BytesStart<'_>, empty: bool) {
        let name = e.name();
        let name = name.as_ref();

        if self.skip_depth > 0 {
            if !empty {
                self.skip_depth += 1;
            }
            return;
        }
        if SKIPPED_ELEMENTS.iter().any(|skipped| *skipped == name) {
            if !empty {
                self.skip_depth = 1;
            }
            return;
        }

        match name {
            b"w:p" => {
                if empty {
                    self.part.blocks.push(Block::Paragraph(Paragraph::new()));
                } else {
                    self.paragraph = Some(OpenParagraph::default());
                }
            }
            b"w:pPr" if !empty => self.in_ppr = true,
            b"w:sectPr" if !empty => {
                self.in_sect_pr = true;
                self.part.section = Section::default();
                self.part.footer_rel = None;
            }
            b"w:r" if !empty && self.paragraph.is_some() => {
                self.run = Some(OpenRun::default());
            }
            b"w:rPr" if !empty && self.run.is_some() => self.in_rpr = true,
            b"w:t" if !empty => self.in_text = true,
            b"w:instrText" if !empty => self.in_instr = true,
            _ if self.in_sect_pr => self.section_property(name, e),
            _ if self.in_rpr => self.run_property(name, e),
            _ if self.in_ppr => self.paragraph_property(name, e),
            _ => self.run_content(name, e),
        }
    }

    fn end(&mut self, name: &[u8]) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }

        match name {
            b"w:t" => self.in_text = false,
            b"w:instrText" => self.in_instr = false,
            b"w:rPr" => self.in_rpr = false,
            b"w:pPr" => self.in_ppr = false,
            b"w:sectPr" => self.in_sect_pr = false,
            b"w:r" => self.finish_run(),
            b"w:p" => self.finish_paragraph(),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.skip_depth > 0 {
            return;
        }
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if self.in_text {
            run.text.push_str(text);
        } else if self.in_instr {
            run.instruction.get_or_insert_with(String::new).push_str(text);
            run.structural = true;
        }
    }

    fn paragraph_property(&mut self, name: &[u8], e: &BytesStart<'_>) {
        let Some(open) = self.paragraph.as_mut() else {
            return;
        };
        let style = &mut open.paragraph.style;
        match name {
            b"w:pStyle" => style.style_id = val(e),
            b"w:jc" => style.alignment = val(e).as_deref().and_then(Alignment::from_ooxml),
            b"w:spacing" => {
                style.space_before = twips_attr(e, b"w:before");
                style.space_after = twips_attr(e, b"w:after");
            }
            b"w:ind" => {
                style.left_indent = twips_attr(e, b"w:left").or_else(|| twips_attr(e, b"w:start"));
            }
            _ => {}
        }
    }

    fn run_property(&mut self, name: &[u8], e: &BytesStart<'_>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let style = &mut run.style;
        match name {
            b"w:b" => style.bold = Some(on_off(e)),
            b"w:i" => style.italic = Some(on_off(e)),
            b"w:u" => style.underline = Some(!matches!(val(e).as_deref(), Some("none" | "0"))),
            b"w:sz" => {
                style.font_size = val(e)
                    .and_then(|v| v.parse::<f32>().ok())
                    .map(|half_points| half_points / 2.0);
            }
            b"w:rFonts" => {
                style.font_name = attr(e, b"w:ascii").or_else(|| attr(e, b"w:hAnsi"));
            }
            _ => {}
        }
    }

    fn run_content(&mut self, name: &[u8], e: &BytesStart<'_>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        match name {
            b"w:tab" => run.text.push('\t'),
            b"w:cr" => run.text.push('\n'),
            b"w:br" => {
                if attr(e, b"w:type").as_deref() == Some("page") {
                    run.structural = true;
                    let run_has_text = !run.text.is_empty();
                    if let Some(open) = self.paragraph.as_mut() {
                        open.note_page_break(run_has_text);
                    }
                } else {
                    run.text.push('\n');
                }
            }
            b"w:fldChar" => run.structural = true,
            _ => {}
        }
    }

    fn section_property(&mut self, name: &[u8], e: &BytesStart<'_>) {
        let section = &mut self.part.section;
        match name {
            b"w:pgSz" => {
                if let Some(w) = twips_attr(e, b"w:w") {
                    section.page_width = w;
                }
                if let Some(h) = twips_attr(e, b"w:h") {
                    section.page_height = h;
                }
            }
            b"w:pgMar" => {
                let defaults = Margins::default();
                section.margins = Margins {
                    top: twips_attr(e, b"w:top").unwrap_or(defaults.top),
                    bottom: twips_attr(e, b"w:bottom").unwrap_or(defaults.bottom),
                    left: twips_attr(e, b"w:left").unwrap_or(defaults.left),
                    right: twips_attr(e, b"w:right").unwrap_or(defaults.right),
                };
            }
            b"w:footerReference" => {
                let kind = attr(e, b"w:type");
                if kind.is_none() || kind.as_deref() == Some("default") {
                    self.part.footer_rel = attr(e, b"r:id");
                }
            }
            _ => {}
        }
    }

    fn finish_run(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        self.in_rpr = false;
        let Some(open) = self.paragraph.as_mut() else {
            return;
        };

        if let Some(instruction) = run.instruction {
            let instruction = instruction.trim().to_string();
            if !instruction.is_empty() {
                open.paragraph.content.push(InlineContent::Field {
                    instruction,
                    style: run.style.clone(),
                });
            }
        }
        if !run.text.is_empty() || !run.structural {
            open.paragraph.add_run(TextRun {
                text: run.text,
                style: run.style,
            });
        }
    }

    fn finish_paragraph(&mut self) {
        let Some(open) = self.paragraph.take() else {
            return;
        };
        let has_content = !open.paragraph.content.is_empty();

        if open.break_before {
            self.part.blocks.push(Block::PageBreak);
        }
        // A paragraph that only held a page break is the break itself.
        if has_content || !(open.break_before || open.break_after) {
            self.part.blocks.push(Block::Paragraph(open.paragraph));
        }
        if open.break_after {
            self.part.blocks.push(Block::PageBreak);
        }
    }
}

fn walk_xml(xml: &str) -> Result<WalkedPart> {
    let mut reader = Reader::from_str(xml);
    let mut walker = BodyWalker::default();

    loop {
        match reader.read_event().map_err(Error::xml)? {
            Event::Start(e) => walker.start(&e, false),
            Event::Empty(e) => walker.start(&e, true),
            Event::End(e) => walker.end(e.name().as_ref()),
            Event::Text(t) => {
                let text = t.unescape().map_err(Error::xml)?;
                walker.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(walker.part)
}
