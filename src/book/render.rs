//! Rendering poems into a formatted book document.

use super::options::BookOptions;
use super::segment::Poem;
use crate::copy::copy_run;
use crate::model::{Alignment, Document, Footer, Metadata, Paragraph, TextRun, POINTS_PER_INCH};

/// Build the book: title page, index, one section per poem and a
/// page-number footer.
pub fn render_book(poems: &[Poem], options: &BookOptions) -> Document {
    let template = &options.template;
    let mut doc = Document::new();
    doc.metadata = Metadata::with_title(options.book_title.clone());
    if options.has_author() {
        doc.metadata.author = Some(options.author.clone());
    }
    doc.metadata.created = Some(chrono::Utc::now());
    doc.section_mut().set_margins(template.margins);

    render_title_page(&mut doc, options);
    render_index(&mut doc, poems, options);

    for (idx, poem) in poems.iter().enumerate() {
        if idx > 0 {
            doc.add_page_break();
        }
        render_poem(&mut doc, poem, options);
    }

    doc.section_mut().footer = Some(Footer::page_numbers(template.page_number_size));
    doc
}

fn centered(run: TextRun) -> Paragraph {
    Paragraph::aligned(Alignment::Center).with_run(run)
}

/// A template run: heading font at the given size.
fn heading(run: TextRun, size: f32, options: &BookOptions) -> TextRun {
    run.with_font(options.template.heading_font.as_str()).with_size(size)
}

fn render_title_page(doc: &mut Document, options: &BookOptions) {
    let template = &options.template;

    doc.add_blank_paragraphs(template.blanks_before_title);
    doc.add_paragraph(centered(
        heading(TextRun::bold(options.book_title.as_str()), template.title_size, options),
    ));

    doc.add_blank_paragraphs(template.blanks_before_subtitle);
    doc.add_paragraph(centered(
        heading(TextRun::italic(template.subtitle.as_str()), template.subtitle_size, options),
    ));

    doc.add_blank_paragraphs(template.blanks_before_author);
    if options.has_author() {
        doc.add_paragraph(centered(
            heading(TextRun::new(options.author.as_str()), template.author_size, options),
        ));
    }

    doc.add_page_break();
}

fn render_index(doc: &mut Document, poems: &[Poem], options: &BookOptions) {
    let template = &options.template;

    doc.add_paragraph(centered(
        heading(
            TextRun::bold(template.index_heading.as_str()),
            template.index_heading_size,
            options,
        ),
    ));
    doc.add_blank_paragraph();

    for poem in poems {
        let entry = doc.add_paragraph(
            Paragraph::new().with_run(heading(
                TextRun::new(poem.title.as_str()),
                template.index_entry_size,
                options,
            )),
        );
        entry.style.left_indent = Some(template.index_indent * POINTS_PER_INCH);
    }

    doc.add_page_break();
}

fn render_poem(doc: &mut Document, poem: &Poem, options: &BookOptions) {
    let template = &options.template;

    doc.add_blank_paragraph();
    doc.add_paragraph(centered(
        heading(TextRun::bold(poem.title.as_str()), template.poem_title_size, options),
    ));
    doc.add_paragraph(centered(
        heading(TextRun::new(template.separator.as_str()), template.separator_size, options),
    ));
    doc.add_blank_paragraph();

    for source in &poem.paragraphs {
        if source.is_blank() {
            doc.add_blank_paragraph();
            continue;
        }

        let line = doc.add_paragraph(Paragraph::aligned(Alignment::Center));
        line.style.space_after = Some(template.body_space_after);
        for run in source.runs() {
            let mut run = copy_run(run);
            run.style.font_name = Some(template.body_font.clone());
            run.style.font_size = Some(template.body_size);
            line.add_run(run);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;

    fn poem(title: &str, lines: &[&str]) -> Poem {
        let mut p = Poem::new(title);
        for line in lines {
            p.paragraphs.push(Paragraph::with_text(*line));
        }
        p
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.paragraphs().map(|p| p.plain_text()).collect()
    }

    fn first_font(p: &Paragraph) -> Option<&str> {
        p.runs().next()?.style.font_name.as_deref()
    }

    #[test]
    fn test_title_page_without_author() {
        let doc = render_book(&[], &BookOptions::default());
        let blocks = doc.blocks();

        // 8 blanks, title, 3 blanks, subtitle, 5 blanks, break
        assert!(blocks[..8].iter().all(|b| b.as_paragraph().is_some_and(Paragraph::is_blank)));
        let title = blocks[8].as_paragraph().unwrap();
        assert_eq!(title.plain_text(), "Coletânea de Poemas");
        assert_eq!(title.runs().next().unwrap().style.font_size, Some(24.0));
        assert_eq!(first_font(title), Some("Georgia"));
        let subtitle = blocks[12].as_paragraph().unwrap();
        assert_eq!(subtitle.runs().next().unwrap().style.italic, Some(true));
        assert_eq!(first_font(subtitle), Some("Georgia"));
        assert!(blocks[18].is_page_break());
        let index_heading = blocks[19].as_paragraph().unwrap();
        assert_eq!(index_heading.plain_text(), "ÍNDICE");
        assert_eq!(first_font(index_heading), Some("Georgia"));
    }

    #[test]
    fn test_title_page_with_author() {
        let options = BookOptions::new().with_author("Cecília");
        let doc = render_book(&[], &options);
        let author = doc.blocks()[18].as_paragraph().unwrap();
        assert_eq!(author.plain_text(), "Cecília");
        assert_eq!(author.runs().next().unwrap().style.font_size, Some(16.0));
        assert_eq!(first_font(author), Some("Georgia"));
        assert_eq!(doc.metadata.author.as_deref(), Some("Cecília"));
    }

    #[test]
    fn test_index_entries() {
        let poems = [poem("A", &["x"]), poem("B", &["y"])];
        let doc = render_book(&poems, &BookOptions::default());
        let entries: Vec<_> = doc
            .paragraphs()
            .filter(|p| p.style.left_indent == Some(36.0))
            .collect();
        let titles: Vec<_> = entries.iter().map(|p| p.plain_text()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert!(entries.iter().all(|p| first_font(p) == Some("Georgia")));
    }

    #[test]
    fn test_page_breaks_between_poems() {
        let poems = [poem("A", &["x"]), poem("B", &["y"]), poem("C", &["z"])];
        let doc = render_book(&poems, &BookOptions::default());
        // title page + index + between poems
        assert_eq!(doc.page_break_count(), 2 + 2);
        assert!(!matches!(doc.blocks().last(), Some(Block::PageBreak)));
    }

    #[test]
    fn test_body_style_override() {
        let mut p = Poem::new("A");
        p.paragraphs.push(
            Paragraph::aligned(Alignment::Left).with_run(
                TextRun::new("verso")
                    .with_font("Arial")
                    .with_size(20.0)
                    .with_italic(true),
            ),
        );
        p.paragraphs.push(Paragraph::with_text("   "));

        let doc = render_book(&[p], &BookOptions::default());
        let line = doc.paragraphs().find(|p| p.plain_text() == "verso").unwrap();
        assert_eq!(line.alignment(), Some(Alignment::Center));
        assert_eq!(line.style.space_after, Some(6.0));
        let run = line.runs().next().unwrap();
        assert_eq!(run.style.font_name.as_deref(), Some("Georgia"));
        assert_eq!(run.style.font_size, Some(11.0));
        assert_eq!(run.style.italic, Some(true));
        assert_eq!(run.style.bold, None);

        // The whitespace-only line becomes a bare blank paragraph.
        let last = doc.blocks().last().and_then(Block::as_paragraph).unwrap();
        assert!(last.content.is_empty());
    }

    #[test]
    fn test_poem_header() {
        let doc = render_book(&[poem("Mar", &["onda"])], &BookOptions::default());
        let all = texts(&doc);
        let pos = all.iter().position(|t| t == "• • •").unwrap();
        assert_eq!(all[pos - 1], "Mar");
        assert_eq!(all[pos - 2], "");
        assert_eq!(all[pos + 1], "");
        assert_eq!(all[pos + 2], "onda");

        let paragraphs: Vec<_> = doc.paragraphs().collect();
        assert_eq!(first_font(paragraphs[pos - 1]), Some("Georgia"));
        assert_eq!(first_font(paragraphs[pos]), Some("Georgia"));
    }

    #[test]
    fn test_footer_and_margins() {
        let doc = render_book(&[], &BookOptions::default());
        assert!(doc.section().footer.as_ref().unwrap().has_page_number());
        assert_eq!(doc.section().margins.left, 90.0);
        assert_eq!(doc.section().margins.top, 72.0);
    }
}
