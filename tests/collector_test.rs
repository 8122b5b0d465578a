//! Integration tests for the collector.

use std::fs;
use std::path::Path;

use versebook::collect::{discover_sources, CollectOptions, Collector};
use versebook::{read_docx, write_docx, Alignment, Block, Document, Error, Paragraph, TextRun};

fn write_poem(dir: &Path, name: &str, lines: &[&str]) {
    let mut doc = Document::new();
    for line in lines {
        if line.is_empty() {
            doc.add_blank_paragraph();
        } else {
            doc.add_paragraph(Paragraph::with_text(*line));
        }
    }
    write_docx(&doc, dir.join(name)).unwrap();
}

fn options(input: &Path, output: &Path) -> CollectOptions {
    CollectOptions::new()
        .with_input_dir(input)
        .with_output_dir(output)
}

/// Index of every title block paragraph in the consolidated document.
fn title_positions(doc: &Document) -> Vec<(usize, String)> {
    doc.blocks()
        .iter()
        .enumerate()
        .filter_map(|(idx, block)| {
            let p = block.as_paragraph()?;
            let bold = p.runs().any(|r| r.style.is_bold());
            (bold && p.alignment() == Some(Alignment::Center)).then(|| (idx, p.plain_text()))
        })
        .collect()
}

#[test]
fn test_collect_orders_by_file_name() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_poem(input.path(), "b.docx", &["dois"]);
    write_poem(input.path(), "a.docx", &["um"]);
    write_poem(input.path(), "C.docx", &["três"]);

    let outcome = Collector::new(options(input.path(), output.path()))
        .run()
        .unwrap();
    assert_eq!(outcome.report.consolidated, vec!["C.docx", "a.docx", "b.docx"]);

    let doc = read_docx(&outcome.path).unwrap();
    let titles: Vec<_> = title_positions(&doc).into_iter().map(|(_, t)| t).collect();
    assert_eq!(titles, vec!["C.docx", "a.docx", "b.docx"]);
}

#[test]
fn test_collect_preserves_content() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut doc = Document::new();
    doc.add_paragraph(
        Paragraph::aligned(Alignment::Right).with_run(
            TextRun::new("Verso")
                .with_italic(true)
                .with_underline(true)
                .with_size(13.0)
                .with_font("Garamond"),
        ),
    );
    doc.add_blank_paragraph();
    doc.add_paragraph(Paragraph::with_text("fim"));
    write_docx(&doc, input.path().join("poema.docx")).unwrap();

    let outcome = Collector::new(options(input.path(), output.path()))
        .run()
        .unwrap();
    let consolidated = read_docx(&outcome.path).unwrap();

    // title, spacer, then the source paragraphs
    let copied: Vec<_> = consolidated.paragraphs().skip(2).cloned().collect();
    let source: Vec<_> = doc.paragraphs().cloned().collect();
    assert_eq!(copied, source);

    let run = copied[0].runs().next().unwrap();
    assert_eq!(run.style.bold, None);
    assert_eq!(run.style.italic, Some(true));
    assert_eq!(run.style.font_name.as_deref(), Some("Garamond"));
}

#[test]
fn test_collect_break_placement() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    for name in ["1.docx", "2.docx", "3.docx", "4.docx"] {
        write_poem(input.path(), name, &["linha", "", "outra"]);
    }

    let outcome = Collector::new(options(input.path(), output.path()))
        .run()
        .unwrap();
    let doc = read_docx(&outcome.path).unwrap();
    assert_eq!(doc.page_break_count(), 3);

    // Every title after the first is directly preceded by a break.
    let titles = title_positions(&doc);
    assert_eq!(titles[0].0, 0);
    for (idx, _) in &titles[1..] {
        assert!(doc.blocks()[idx - 1].is_page_break());
    }
    assert!(!matches!(doc.blocks().last(), Some(Block::PageBreak)));
}

#[test]
fn test_collect_source_breaks_become_blank_lines() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut doc = Document::new();
    doc.add_paragraph(Paragraph::with_text("estrofe um"));
    doc.add_page_break();
    doc.add_paragraph(Paragraph::with_text("estrofe dois"));
    write_docx(&doc, input.path().join("A.docx")).unwrap();
    write_poem(input.path(), "B.docx", &["Lua"]);

    let outcome = Collector::new(options(input.path(), output.path()))
        .run()
        .unwrap();
    let consolidated = read_docx(&outcome.path).unwrap();
    assert_eq!(
        consolidated.page_break_count(),
        outcome.report.consolidated.len() - 1
    );

    let poems = versebook::book::segment(&consolidated, ".docx");
    let body: Vec<_> = poems[0].paragraphs.iter().map(|p| p.plain_text()).collect();
    assert_eq!(body, vec!["estrofe um", "", "estrofe dois"]);
}

#[test]
fn test_collect_skips_unreadable_file() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_poem(input.path(), "a.docx", &["um"]);
    fs::write(input.path().join("b.docx"), b"this is not a document").unwrap();
    write_poem(input.path(), "c.docx", &["três"]);

    let outcome = Collector::new(options(input.path(), output.path()))
        .run()
        .unwrap();
    let report = &outcome.report;
    assert_eq!(report.consolidated, vec!["a.docx", "c.docx"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source.name, "b.docx");
    assert!(matches!(report.failures[0].error, Error::FileRead { .. }));

    let doc = read_docx(&outcome.path).unwrap();
    assert_eq!(doc.page_break_count(), 1);
}

#[test]
fn test_collect_missing_folder() {
    let root = tempfile::tempdir().unwrap();
    let result = Collector::new(options(&root.path().join("input"), root.path())).run();
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_collect_empty_folder() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("notes.txt"), b"x").unwrap();

    let result = Collector::new(options(input.path(), output.path())).run();
    assert!(matches!(result, Err(Error::EmptyInput { .. })));
    assert!(!output.path().join("consolidado.docx").exists());
}

#[test]
fn test_collect_creates_output_folder() {
    let input = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    write_poem(input.path(), "a.docx", &["um"]);

    let out_dir = root.path().join("novo").join("saida");
    let outcome = Collector::new(options(input.path(), &out_dir))
        .run()
        .unwrap();
    assert_eq!(outcome.path, out_dir.join("consolidado.docx"));
    assert!(outcome.path.is_file());
}

#[test]
fn test_discover_ignores_other_extensions() {
    let input = tempfile::tempdir().unwrap();
    write_poem(input.path(), "a.docx", &["um"]);
    fs::write(input.path().join("a.doc"), b"x").unwrap();
    fs::write(input.path().join("~$a.docx.tmp"), b"x").unwrap();

    let sources = discover_sources(input.path(), ".docx").unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "a.docx");
}
