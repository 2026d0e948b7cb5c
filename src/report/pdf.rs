//! A minimal paginating PDF writer.
//!
//! Text is laid out top to bottom on A4 pages using the standard Type1 fonts,
//! which need no embedding. Lines that would run into the bottom margin start
//! a new page, re-printing any registered table header first.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, StringFormat, Stream, dictionary};

use crate::error::{ExportError, SalaryResult};

/// A4 width in points.
pub(crate) const PAGE_WIDTH: i64 = 595;
/// A4 height in points.
pub(crate) const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const FOOTER_Y: i64 = 30;
const FOOTER_SIZE: i64 = 8;

/// Characters per line of 8pt Courier between the margins.
pub(crate) const MONO_COLUMNS: usize = ((PAGE_WIDTH - 2 * MARGIN) * 10 / 48) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
    Mono,
    MonoBold,
}

impl Font {
    const ALL: [Font; 4] = [Font::Regular, Font::Bold, Font::Mono, Font::MonoBold];

    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Mono => "F3",
            Font::MonoBold => "F4",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Mono => "Courier",
            Font::MonoBold => "Courier-Bold",
        }
    }
}

#[derive(Debug, Clone)]
struct TextLine {
    font: Font,
    size: i64,
    x: i64,
    y: i64,
    text: String,
}

#[derive(Debug, Clone)]
struct HeaderLine {
    font: Font,
    size: i64,
    text: String,
}

/// Collects lines of text into pages.
#[derive(Debug)]
pub(crate) struct PageComposer {
    pages: Vec<Vec<TextLine>>,
    cursor: i64,
    repeated: Vec<HeaderLine>,
}

impl PageComposer {
    pub(crate) fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT - MARGIN,
            repeated: Vec::new(),
        }
    }

    /// Writes one line at the left margin, starting a new page if needed.
    pub(crate) fn line(&mut self, font: Font, size: i64, text: impl Into<String>) {
        if self.cursor - leading(size) < MARGIN {
            self.break_page();
        }
        self.place(font, size, text.into());
    }

    /// Leaves vertical space. Never starts a page by itself.
    pub(crate) fn space(&mut self, points: i64) {
        self.cursor = (self.cursor - points).max(MARGIN);
    }

    /// Lines printed at the top of every page started from now on.
    /// An empty list stops the repetition.
    pub(crate) fn repeat_on_new_pages(&mut self, lines: &[(Font, i64, String)]) {
        self.repeated = lines
            .iter()
            .map(|(font, size, text)| HeaderLine {
                font: *font,
                size: *size,
                text: text.clone(),
            })
            .collect();
    }

    /// Ensures at least `lines` more lines of `size` fit on the current page.
    pub(crate) fn keep_together(&mut self, lines: i64, size: i64) {
        if self.cursor - lines * leading(size) < MARGIN {
            self.break_page();
        }
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn place(&mut self, font: Font, size: i64, text: String) {
        self.cursor -= leading(size);
        let y = self.cursor;
        if let Some(page) = self.pages.last_mut() {
            page.push(TextLine {
                font,
                size,
                x: MARGIN,
                y,
                text,
            });
        }
    }

    fn break_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor = PAGE_HEIGHT - MARGIN;
        let header = std::mem::take(&mut self.repeated);
        for line in &header {
            self.place(line.font, line.size, line.text.clone());
        }
        self.repeated = header;
    }

    /// Renders every page, with `footer` and "Page i of n" at the bottom.
    pub(crate) fn finish(self, footer: &str) -> SalaryResult<Vec<u8>> {
        let total = self.pages.len();
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for font in Font::ALL {
            let id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource(), id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut kids = Vec::with_capacity(total);
        for (index, lines) in self.pages.into_iter().enumerate() {
            let mut operations = Vec::with_capacity(lines.len() * 5 + 10);
            for line in &lines {
                push_text(&mut operations, line);
            }

            let page_label = format!("Page {} of {}", index + 1, total);
            push_text(
                &mut operations,
                &TextLine {
                    font: Font::Regular,
                    size: FOOTER_SIZE,
                    x: MARGIN,
                    y: FOOTER_Y,
                    text: footer.to_string(),
                },
            );
            push_text(
                &mut operations,
                &TextLine {
                    font: Font::Mono,
                    size: FOOTER_SIZE,
                    x: PAGE_WIDTH - MARGIN - mono_width(&page_label, FOOTER_SIZE),
                    y: FOOTER_Y,
                    text: page_label,
                },
            );

            let content = Content { operations }.encode().map_err(render_error)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => total as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(render_error)?;
        Ok(bytes)
    }
}

fn leading(size: i64) -> i64 {
    size + size / 2
}

// Courier glyphs are 0.6 em wide.
fn mono_width(text: &str, size: i64) -> i64 {
    text.chars().count() as i64 * size * 6 / 10
}

fn push_text(operations: &mut Vec<Operation>, line: &TextLine) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![
            Object::Name(line.font.resource().as_bytes().to_vec()),
            Object::Integer(line.size),
        ],
    ));
    operations.push(Operation::new(
        "Td",
        vec![Object::Integer(line.x), Object::Integer(line.y)],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(encode_text(&line.text), StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}

/// Maps text to single-byte codes; anything the standard fonts cannot show
/// becomes `?`.
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        })
        .collect()
}

fn render_error(error: impl std::fmt::Display) -> ExportError {
    ExportError::Render {
        message: error.to_string(),
    }
}
