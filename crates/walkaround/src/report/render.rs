//! PDF output for a [`Layout`].
//!
//! Uses the two standard Helvetica faces, so no fonts are embedded. Text is
//! encoded as `WinAnsiEncoding`; characters outside it are written as `?`.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use super::layout::{Layout, Page, TextRun, PAGE_HEIGHT, PAGE_WIDTH};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Distance from the top of a line to its baseline, per point of font size.
const BASELINE: f32 = 0.8;
/// Line spacing inside multi-line blocks, per point of font size.
const LEADING: f32 = 1.2;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width assumed for characters outside the table.
const DEFAULT_WIDTH: u16 = 556;

/// Metadata written into the PDF document information dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    /// Document title.
    pub title: String,
    /// Document author.
    pub author: String,
    /// Creating application.
    pub creator: String,
}

/// Serialize `layout` as a PDF document.
#[must_use]
pub fn render(layout: &Layout, info: &DocumentInfo) -> Vec<u8> {
    let mut next = Ref::new(1);
    let catalog_id = next.bump();
    let tree_id = next.bump();
    let regular_id = next.bump();
    let bold_id = next.bump();
    let info_id = next.bump();
    let page_ids: Vec<(Ref, Ref)> = layout
        .pages()
        .iter()
        .map(|_| (next.bump(), next.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(i32::try_from(page_ids.len()).unwrap_or(i32::MAX));

    for (page, &(page_id, content_id)) in layout.pages().iter().zip(&page_ids) {
        let mut writer = pdf.page(page_id);
        writer.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        writer.parent(tree_id);
        writer.contents(content_id);
        writer
            .resources()
            .fonts()
            .pair(REGULAR, regular_id)
            .pair(BOLD, bold_id);
        writer.finish();

        pdf.stream(content_id, &page_content(page));
    }

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    pdf.document_info(info_id)
        .title(TextStr(&info.title))
        .author(TextStr(&info.author))
        .creator(TextStr(&info.creator))
        .producer(TextStr(concat!("walkaround ", env!("CARGO_PKG_VERSION"))));

    pdf.finish()
}

fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    content.set_fill_gray(0.0);
    for run in &page.runs {
        draw_run(&mut content, run);
    }
    content.finish()
}

fn draw_run(content: &mut Content, run: &TextRun) {
    let size = run.role.font_size();
    let font = if run.role.is_bold() { BOLD } else { REGULAR };
    let x = if run.role.is_right_aligned() {
        run.x - text_width(&run.text, size)
    } else {
        run.x
    };
    let baseline = PAGE_HEIGHT - run.y - size * BASELINE;

    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, baseline);
    for (i, line) in run.text.lines().enumerate() {
        if i > 0 {
            content.next_line(0.0, -size * LEADING);
        }
        content.show(Str(&win_ansi(line)));
    }
    content.end_text();
}

/// Approximate rendered width of `text` in Helvetica at `size` points.
fn text_width(text: &str, size: f32) -> f32 {
    let units: f32 = text
        .chars()
        .map(|c| {
            let width = usize::try_from(u32::from(c))
                .ok()
                .and_then(|code| code.checked_sub(32))
                .and_then(|index| HELVETICA_WIDTHS.get(index))
                .copied()
                .unwrap_or(DEFAULT_WIDTH);
            f32::from(width)
        })
        .sum();
    units * size / 1000.0
}

/// Encode `text` for a `WinAnsiEncoding` font.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => u8::try_from(c).unwrap_or(b'?'),
            '\u{20ac}' => 0x80,
            '\u{201a}' => 0x82,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::record::tests::sample_record;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "WalkAround Checklist Record".to_string(),
            author: "Depot 7".to_string(),
            creator: "WalkAround Checks".to_string(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn page_objects(bytes: &[u8]) -> usize {
        let needle = b"/Type /Page";
        bytes
            .windows(needle.len() + 1)
            .filter(|w| w.starts_with(needle) && w[needle.len()] != b's')
            .count()
    }

    #[test]
    fn test_renders_pdf_document() {
        let record = sample_record("John Doe", &[], "");
        let bytes = render(&Layout::build(&record, &Catalog::standard()), &info());

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"%%EOF"));
        assert!(contains(&bytes, b"/Helvetica-Bold"));
        assert!(contains(&bytes, b"/WinAnsiEncoding"));
        assert!(contains(&bytes, b"(Driver: John Doe)"));
        assert!(contains(&bytes, b"(Page 1)"));
        assert!(contains(&bytes, b"(Depot 7)"));
    }

    #[test]
    fn test_one_page_object_per_layout_page() {
        let catalog = Catalog::standard();
        let items: Vec<&str> = catalog.items().collect();
        let record = sample_record("John Doe", &items, "");
        let layout = Layout::build(&record, &catalog);
        let bytes = render(&layout, &info());

        assert_eq!(layout.pages().len(), 2);
        assert_eq!(page_objects(&bytes), 2);
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"(Page 2)"));
    }

    #[test]
    fn test_multiline_comments_render_each_line() {
        let record = sample_record("J", &[], "first line\nsecond line");
        let bytes = render(&Layout::build(&record, &Catalog::standard()), &info());

        assert!(contains(&bytes, b"(first line)"));
        assert!(contains(&bytes, b"(second line)"));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(win_ansi("Tires: ok"), b"Tires: ok".to_vec());
        assert_eq!(win_ansi("café"), vec![b'c', b'a', b'f', 0xe9]);
        assert_eq!(win_ansi("driver’s"), vec![b'd', b'r', b'i', b'v', b'e', b'r', 0x92, b's']);
        assert_eq!(win_ansi("日本"), b"??".to_vec());
        assert_eq!(win_ansi("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn test_text_width() {
        assert!((text_width("Page 1", 10.0) - 31.69).abs() < 0.01);
        assert_eq!(text_width("", 10.0), 0.0);
        assert!(text_width("W", 12.0) > text_width("i", 12.0));
        // Outside the table: control, DEL and non-ASCII
        for c in ["\u{1}", "\u{7f}", "é", "日"] {
            assert!((text_width(c, 10.0) - 5.56).abs() < 0.001);
        }
    }
}
