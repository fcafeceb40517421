//! Page layout for inspection reports.
//!
//! Layout works top-down in points on a US-Letter page: `y` is the distance
//! from the top edge. Before every category header and item line the cursor
//! is checked against the printable area; if the line would run into the
//! footer reservation, the page is closed and a new one started.

use crate::catalog::Catalog;
use crate::record::Record;

/// Page width in points (8.5 in).
pub const PAGE_WIDTH: f32 = 612.0;
/// Page height in points (11 in).
pub const PAGE_HEIGHT: f32 = 792.0;
/// Left margin and top cursor position of every page.
pub const MARGIN: f32 = 20.0;
/// Cursor advance per line.
pub const LINE_HEIGHT: f32 = 20.0;
/// Space kept free at the bottom of each page for the footer.
pub const FOOTER_RESERVE: f32 = 60.0;
/// Footer distance from the bottom edge.
pub const FOOTER_OFFSET: f32 = 40.0;
/// Extra indent of item lines under their category.
pub const ITEM_INDENT: f32 = 20.0;

/// Report title, also used as the PDF document title.
pub const TITLE: &str = "WalkAround Checklist Record";
/// Left-hand footer text.
pub const FOOTER_TEXT: &str = "Generated by WalkAround-Checks App";

const SECTION_TITLE: &str = "Completed Checklist Items:";
const COMMENTS_TITLE: &str = "Comments:";

/// What a piece of text is, which decides its font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The report title.
    Title,
    /// A header field (date, driver, truck).
    Field,
    /// The "Completed Checklist Items:" heading.
    SectionTitle,
    /// A category name.
    CategoryHeader,
    /// A completed item line.
    Item,
    /// The "Comments:" heading.
    CommentsHeader,
    /// The comment text block.
    Comments,
    /// Left-hand footer text.
    FooterLeft,
    /// Right-aligned page number.
    FooterRight,
}

impl Role {
    /// Font size in points.
    #[must_use]
    pub fn font_size(self) -> f32 {
        match self {
            Self::Title | Self::SectionTitle | Self::CommentsHeader => 18.0,
            Self::CategoryHeader => 14.0,
            Self::Field | Self::Item | Self::Comments => 12.0,
            Self::FooterLeft | Self::FooterRight => 10.0,
        }
    }

    /// Whether the text is set in bold.
    #[must_use]
    pub fn is_bold(self) -> bool {
        matches!(
            self,
            Self::Title | Self::SectionTitle | Self::CommentsHeader | Self::CategoryHeader
        )
    }

    /// Whether `x` is the right edge of the text instead of the left.
    #[must_use]
    pub fn is_right_aligned(self) -> bool {
        matches!(self, Self::FooterRight)
    }
}

/// A piece of text placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// What the text is.
    pub role: Role,
    /// The text; comment blocks may contain newlines.
    pub text: String,
    /// Horizontal anchor in points from the left edge.
    pub x: f32,
    /// Top of the line in points from the top edge.
    pub y: f32,
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    /// Text in drawing order.
    pub runs: Vec<TextRun>,
}

impl Page {
    fn new(number: u32) -> Self {
        Self {
            number,
            runs: Vec::new(),
        }
    }

    /// Runs with the given role, in drawing order.
    pub fn runs_with(&self, role: Role) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |r| r.role == role)
    }
}

/// A whole report, page by page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pages: Vec<Page>,
}

impl Layout {
    /// Lay out `record`, grouping its items by `catalog` category.
    ///
    /// Categories and items appear in catalog order; categories with no
    /// completed items are left out entirely. The comment block is placed
    /// after a single room check and is not split across pages.
    #[must_use]
    pub fn build(record: &Record, catalog: &Catalog) -> Self {
        let mut cursor = Cursor::new();

        cursor.draw(Role::Title, MARGIN, TITLE, 40.0);
        cursor.draw(
            Role::Field,
            MARGIN,
            &format!("Date: {}", record.date().format("%d/%m/%Y")),
            LINE_HEIGHT,
        );
        cursor.draw(
            Role::Field,
            MARGIN,
            &format!("Driver: {}", record.driver_name()),
            LINE_HEIGHT,
        );
        cursor.draw(
            Role::Field,
            MARGIN,
            &format!("Truck: {}", record.truck_number()),
            40.0,
        );
        cursor.draw(Role::SectionTitle, MARGIN, SECTION_TITLE, LINE_HEIGHT);

        for category in catalog.categories() {
            let done = record.completed_in(category);
            if done.is_empty() {
                continue;
            }

            cursor.ensure_room(LINE_HEIGHT);
            cursor.draw(Role::CategoryHeader, MARGIN, category.name(), LINE_HEIGHT);

            for item in done {
                cursor.ensure_room(LINE_HEIGHT);
                cursor.draw(Role::Item, MARGIN + ITEM_INDENT, item, LINE_HEIGHT);
            }
        }

        if !record.comments().is_empty() {
            cursor.ensure_room(2.0 * LINE_HEIGHT);
            cursor.y += LINE_HEIGHT;
            cursor.draw(Role::CommentsHeader, MARGIN, COMMENTS_TITLE, LINE_HEIGHT);
            cursor.draw(Role::Comments, MARGIN, record.comments(), 0.0);
        }

        cursor.finish()
    }

    /// All pages, first to last.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Every run on every page, in drawing order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(|p| p.runs.iter())
    }

    /// Every run with the given role, across pages.
    pub fn runs_with(&self, role: Role) -> impl Iterator<Item = &TextRun> {
        self.runs().filter(move |r| r.role == role)
    }
}

struct Cursor {
    done: Vec<Page>,
    page: Page,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            page: Page::new(1),
            y: MARGIN,
        }
    }

    fn draw(&mut self, role: Role, x: f32, text: &str, advance: f32) {
        self.page.runs.push(TextRun {
            role,
            text: text.to_string(),
            x,
            y: self.y,
        });
        self.y += advance;
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.y + needed > PAGE_HEIGHT - FOOTER_RESERVE {
            let next = Page::new(self.page.number + 1);
            let full = std::mem::replace(&mut self.page, next);
            self.done.push(with_footer(full));
            self.y = MARGIN;
        }
    }

    fn finish(mut self) -> Layout {
        self.done.push(with_footer(self.page));
        Layout { pages: self.done }
    }
}

fn with_footer(mut page: Page) -> Page {
    let y = PAGE_HEIGHT - FOOTER_OFFSET;
    page.runs.push(TextRun {
        role: Role::FooterLeft,
        text: FOOTER_TEXT.to_string(),
        x: MARGIN,
        y,
    });
    page.runs.push(TextRun {
        role: Role::FooterRight,
        text: format!("Page {}", page.number),
        x: PAGE_WIDTH - MARGIN,
        y,
    });
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::record::tests::sample_record;

    fn texts<'a>(runs: impl Iterator<Item = &'a TextRun>) -> Vec<&'a str> {
        runs.map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_header_block_positions() {
        let record = sample_record("John Doe", &[], "");
        let layout = Layout::build(&record, &Catalog::standard());
        let page = &layout.pages()[0];

        let header: Vec<(&str, f32)> = page.runs[..5]
            .iter()
            .map(|r| (r.text.as_str(), r.y))
            .collect();
        assert_eq!(
            header,
            vec![
                ("WalkAround Checklist Record", 20.0),
                ("Date: 05/03/2024", 60.0),
                ("Driver: John Doe", 80.0),
                ("Truck: 1234", 100.0),
                ("Completed Checklist Items:", 140.0),
            ]
        );
    }

    #[test]
    fn test_zero_items_has_only_header_and_footer() {
        let record = sample_record("John Doe", &[], "");
        let layout = Layout::build(&record, &Catalog::standard());

        assert_eq!(layout.pages().len(), 1);
        assert_eq!(layout.runs_with(Role::CategoryHeader).count(), 0);
        assert_eq!(layout.runs_with(Role::Item).count(), 0);
        assert_eq!(layout.runs_with(Role::CommentsHeader).count(), 0);
        assert_eq!(texts(layout.runs_with(Role::FooterRight)), vec!["Page 1"]);
        assert_eq!(
            texts(layout.runs_with(Role::FooterLeft)),
            vec!["Generated by WalkAround-Checks App"]
        );
    }

    #[test]
    fn test_single_category_without_comments() {
        let catalog = Catalog::standard();
        let safety = catalog.category("Safety Features").unwrap();
        let items: Vec<&str> = safety.items().iter().map(String::as_str).collect();
        let record = sample_record("John Doe", &items, "");

        let layout = Layout::build(&record, &catalog);

        assert_eq!(
            texts(layout.runs_with(Role::CategoryHeader)),
            vec!["Safety Features"]
        );
        assert_eq!(texts(layout.runs_with(Role::Item)), items);
        assert_eq!(layout.runs_with(Role::CommentsHeader).count(), 0);
        assert_eq!(layout.runs_with(Role::Comments).count(), 0);
    }

    #[test]
    fn test_items_follow_catalog_not_storage_order() {
        let catalog = Catalog::new(vec![
            Category::new("First", ["a", "b", "c"]),
            Category::new("Empty", ["x"]),
            Category::new("Second", ["d"]),
        ]);
        let record = sample_record("J", &["d", "c", "a", "zzz", "a"], "");

        let layout = Layout::build(&record, &catalog);

        assert_eq!(
            texts(layout.runs_with(Role::CategoryHeader)),
            vec!["First", "Second"]
        );
        assert_eq!(texts(layout.runs_with(Role::Item)), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_item_lines_are_indented() {
        let catalog = Catalog::new(vec![Category::new("Only", ["a"])]);
        let record = sample_record("J", &["a"], "");
        let layout = Layout::build(&record, &catalog);

        let header = layout.runs_with(Role::CategoryHeader).next().unwrap();
        let item = layout.runs_with(Role::Item).next().unwrap();
        assert_eq!(header.x, MARGIN);
        assert_eq!(item.x, MARGIN + ITEM_INDENT);
        assert_eq!((header.y, item.y), (160.0, 180.0));
    }

    #[test]
    fn test_full_record_breaks_onto_second_page() {
        let catalog = Catalog::standard();
        let items: Vec<&str> = catalog.items().collect();
        let record = sample_record("John Doe", &items, "All good");

        let layout = Layout::build(&record, &catalog);

        // 35 lines: 28 fit below the header, 7 spill over
        assert_eq!(layout.pages().len(), 2);
        let first = &layout.pages()[0];
        let second = &layout.pages()[1];
        let body = |p: &Page| {
            p.runs
                .iter()
                .filter(|r| matches!(r.role, Role::CategoryHeader | Role::Item))
                .count()
        };
        assert_eq!(body(first), 28);
        assert_eq!(body(second), 7);
        assert_eq!(second.runs[0].y, MARGIN);

        assert_eq!(texts(first.runs_with(Role::FooterRight)), vec!["Page 1"]);
        assert_eq!(texts(second.runs_with(Role::FooterRight)), vec!["Page 2"]);

        let comments_header = second.runs_with(Role::CommentsHeader).next().unwrap();
        assert_eq!(comments_header.y, 180.0);
        let comments = second.runs_with(Role::Comments).next().unwrap();
        assert_eq!((comments.text.as_str(), comments.y), ("All good", 200.0));
    }

    #[test]
    fn test_nothing_drawn_into_footer_reservation() {
        let labels: Vec<String> = (0..120).map(|i| format!("item {i}")).collect();
        let catalog = Catalog::new(vec![
            Category::new("Long", labels.iter().take(60).cloned()),
            Category::new("Longer", labels.iter().skip(60).cloned()),
        ]);
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let record = sample_record("J", &refs, "");

        let layout = Layout::build(&record, &catalog);

        assert_eq!(layout.runs_with(Role::Item).count(), 120);
        for run in layout.runs() {
            if matches!(run.role, Role::CategoryHeader | Role::Item) {
                assert!(run.y + LINE_HEIGHT <= PAGE_HEIGHT - FOOTER_RESERVE);
            }
        }
        let numbers: Vec<u32> = layout.pages().iter().map(|p| p.number).collect();
        assert_eq!(numbers, (1..=u32::try_from(numbers.len()).unwrap()).collect::<Vec<_>>());
        for page in layout.pages() {
            assert_eq!(page.runs_with(Role::FooterLeft).count(), 1);
            assert_eq!(page.runs_with(Role::FooterRight).count(), 1);
        }
    }

    #[test]
    fn test_comments_break_needs_two_lines_of_room() {
        // 28 lines fill page one down to y = 720; comments need 40 more
        let labels: Vec<String> = (0..27).map(|i| format!("item {i}")).collect();
        let catalog = Catalog::new(vec![Category::new("C", labels.iter().cloned())]);
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let record = sample_record("J", &refs, "Note");

        let layout = Layout::build(&record, &catalog);

        assert_eq!(layout.pages().len(), 2);
        assert_eq!(layout.pages()[0].runs_with(Role::Item).count(), 27);
        let header = layout.pages()[1].runs_with(Role::CommentsHeader).next().unwrap();
        assert_eq!(header.y, MARGIN + LINE_HEIGHT);
    }

    #[test]
    fn test_long_comments_are_one_block() {
        let comments = "line\n".repeat(80);
        let record = sample_record("J", &[], &comments);
        let layout = Layout::build(&record, &Catalog::standard());

        assert_eq!(layout.pages().len(), 1);
        let blocks: Vec<&TextRun> = layout.runs_with(Role::Comments).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, comments);
    }

    #[test]
    fn test_role_fonts() {
        assert!(Role::Title.is_bold());
        assert!(Role::CategoryHeader.is_bold());
        assert!(!Role::Item.is_bold());
        assert_eq!(Role::CategoryHeader.font_size(), 14.0);
        assert_eq!(Role::FooterRight.font_size(), 10.0);
        assert!(Role::FooterRight.is_right_aligned());
        assert!(!Role::FooterLeft.is_right_aligned());
    }
}
