//! End-to-end tests for the two-stage pipeline.

use std::fs;
use std::path::Path;

use versebook::{
    collect_folder, format_poetry_book, read_docx, write_docx, CollectEvent, Document, Error,
    Paragraph, Pipeline,
};

fn write_poem(dir: &Path, name: &str, lines: &[&str]) {
    let mut doc = Document::new();
    for line in lines {
        doc.add_paragraph(Paragraph::with_text(*line));
    }
    write_docx(&doc, dir.join(name)).unwrap();
}

#[test]
fn test_pipeline_runs_both_stages() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_poem(input.path(), "Outono.docx", &["folhas"]);
    write_poem(input.path(), "Verão.docx", &["sol", "calor"]);

    let mut started = Vec::new();
    let outcome = Pipeline::new()
        .with_input_dir(input.path())
        .with_output_dir(output.path())
        .with_title("Estações")
        .run_with(|event| {
            if let CollectEvent::Started { source, .. } = event {
                started.push(source.name.clone());
            }
        })
        .unwrap();

    assert_eq!(started, vec!["Outono.docx", "Verão.docx"]);
    assert_eq!(
        outcome.collected.path,
        output.path().join("consolidado.docx")
    );
    assert_eq!(
        outcome.book.path,
        output.path().join("livro_de_poemas.docx")
    );
    assert_eq!(outcome.book.report.titles(), vec!["Outono", "Verão"]);
    assert_eq!(outcome.book.report.stats.line_count, 3);

    let book = read_docx(&outcome.book.path).unwrap();
    assert!(book.paragraphs().any(|p| p.plain_text() == "Estações"));
}

#[test]
fn test_pipeline_stops_when_collection_fails() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("a.docx"), b"broken").unwrap();

    let result = Pipeline::new()
        .with_input_dir(input.path())
        .with_output_dir(output.path())
        .run();

    assert!(matches!(result, Err(Error::NothingCollected { failed: 1 })));
    assert!(!output.path().join("livro_de_poemas.docx").exists());
}

#[test]
fn test_pipeline_empty_folder() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    let result = Pipeline::new()
        .with_input_dir(input.path())
        .with_output_dir(output.path())
        .run();
    assert!(matches!(result, Err(Error::EmptyInput { .. })));
}

#[test]
fn test_convenience_functions() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_poem(input.path(), "Mar.docx", &["onda", "areia"]);

    let consolidated = collect_folder(input.path(), output.path()).unwrap();
    assert_eq!(consolidated, output.path().join("consolidado.docx"));

    let book_path = output.path().join("livro.docx");
    let outcome = format_poetry_book(&consolidated, &book_path).unwrap();
    assert_eq!(outcome.report.titles(), vec!["Mar"]);
    assert!(book_path.is_file());
}

#[test]
fn test_format_missing_consolidated_document() {
    let dir = tempfile::tempdir().unwrap();
    let result = format_poetry_book(dir.path().join("nada.docx"), dir.path().join("livro.docx"));
    assert!(matches!(result, Err(Error::NotFound(_))));
}
