//! PDF rendering for the report blocks.
//!
//! Layout works in millimetres from the top-left corner, like a printed page.
//! [`render`] converts to PDF user space (points, origin bottom-left) and
//! writes a single-file PDF 1.4 document using the standard Type 1 fonts, so
//! no font data has to be embedded.

use super::document::{self, Block};
use super::Report;
use crate::error::Result;

const PT_PER_MM: f64 = 72.0 / 25.4;

// ---------------------------------------------------------------------------
// Page geometry
// ---------------------------------------------------------------------------

/// A4 portrait with 20mm margins and a 7mm line pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_left_mm: f64,
    /// Safety margin: no line is placed below `height_mm - margin_bottom_mm`.
    pub margin_bottom_mm: f64,
    pub line_height_mm: f64,
    pub max_width_mm: f64,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_top_mm: 20.0,
            margin_left_mm: 20.0,
            margin_bottom_mm: 20.0,
            line_height_mm: 7.0,
            max_width_mm: 170.0,
        }
    }
}

impl PageSpec {
    fn last_baseline(&self) -> f64 {
        self.height_mm - self.margin_bottom_mm
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Average glyph advance as a fraction of the font size. Helvetica has no
    /// fixed pitch, so wrapping is approximate and errs on the wide side.
    fn average_advance(self) -> f64 {
        match self {
            Font::Regular => 0.5,
            Font::Bold => 0.55,
        }
    }
}

/// One positioned line of text. `y_mm` is the baseline measured from the top.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x_mm: f64,
    pub y_mm: f64,
    pub font: Font,
    pub size: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width_mm: f64,
    pub height_mm: f64,
    pub lines: Vec<Line>,
}

impl Page {
    fn new(spec: &PageSpec) -> Self {
        Self {
            width_mm: spec.width_mm,
            height_mm: spec.height_mm,
            lines: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

struct Style {
    font: Font,
    size: f64,
    /// Extra advance after the block, in line heights.
    trailing: f64,
    keep_with_next: bool,
}

fn style(block: &Block) -> Style {
    let (font, size, trailing, keep_with_next) = match block {
        Block::Title(_) => (Font::Bold, 20.0, 1.0, true),
        Block::Heading(_) => (Font::Bold, 16.0, 0.0, true),
        Block::Subheading(_) => (Font::Bold, 14.0, 0.0, true),
        Block::Field { .. } | Block::Paragraph(_) | Block::Spacer => {
            (Font::Regular, 12.0, 0.0, false)
        }
    };
    Style {
        font,
        size,
        trailing,
        keep_with_next,
    }
}

/// Greedy word wrap against `max_width_mm`. Words longer than a full line are
/// split across lines.
pub fn wrap(text: &str, font: Font, size: f64, max_width_mm: f64) -> Vec<String> {
    let char_mm = size * font.average_advance() / PT_PER_MM;
    let max_chars = ((max_width_mm / char_mm).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(max_chars) {
            let piece: String = piece.iter().collect();
            let needed = if current.is_empty() {
                piece.chars().count()
            } else {
                current.chars().count() + 1 + piece.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Place blocks on pages. A new page starts whenever the cursor passes the
/// bottom safety margin; headings move to the next page rather than end one.
pub fn layout(blocks: &[Block], spec: &PageSpec) -> Vec<Page> {
    let mut pages = vec![Page::new(spec)];
    let mut y = spec.margin_top_mm;
    let limit = spec.last_baseline();

    for block in blocks {
        let Some(text) = block.text() else {
            y += spec.line_height_mm * 0.5;
            continue;
        };
        let st = style(block);
        let wrapped = wrap(&text, st.font, st.size, spec.max_width_mm);

        let page_started = pages.last().is_some_and(|p| !p.lines.is_empty());
        if st.keep_with_next
            && page_started
            && y + spec.line_height_mm * wrapped.len() as f64 > limit
        {
            pages.push(Page::new(spec));
            y = spec.margin_top_mm;
        }

        for text in wrapped {
            if y > limit {
                pages.push(Page::new(spec));
                y = spec.margin_top_mm;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(Line {
                    x_mm: spec.margin_left_mm,
                    y_mm: y,
                    font: st.font,
                    size: st.size,
                    text,
                });
            }
            y += spec.line_height_mm;
        }
        y += spec.line_height_mm * st.trailing;
    }

    pages
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Escape a string for a PDF literal. Anything outside printable ASCII
/// becomes `?` since the standard fonts only cover WinAnsi.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Text operators for one page, newline separated. No trailing EOL: the
/// writer adds the one that precedes `endstream`.
fn content_stream(page: &Page) -> String {
    page.lines
        .iter()
        .map(|line| {
            let x = line.x_mm * PT_PER_MM;
            let y = (page.height_mm - line.y_mm) * PT_PER_MM;
            format!(
                "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
                line.font.resource(),
                line.size,
                x,
                y,
                escape(&line.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = b"%PDF-1.4\n".to_vec();
        // Binary marker comment so transfer tools treat the file as binary.
        buf.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    /// Append object number `offsets.len() + 1`.
    fn object(&mut self, body: &str) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf
            .extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_at = self.buf.len();
        let size = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        ));
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}

/// Serialize laid-out pages. Object layout: 1 catalog, 2 page tree, 3-4
/// fonts, then a page object followed by its content stream for each page.
pub fn render(pages: &[Page]) -> Vec<u8> {
    const FIRST_PAGE_OBJ: usize = 5;
    let fonts = [Font::Regular, Font::Bold];

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJ + i * 2))
        .collect();

    let mut w = PdfWriter::new();
    w.object("<< /Type /Catalog /Pages 2 0 R >>");
    w.object(&format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    for font in fonts {
        w.object(&format!(
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
            font.base_font()
        ));
    }
    let font_resources: Vec<String> = fonts
        .iter()
        .enumerate()
        .map(|(i, f)| format!("/{} {} 0 R", f.resource(), 3 + i))
        .collect();

    for (i, page) in pages.iter().enumerate() {
        let contents_id = FIRST_PAGE_OBJ + i * 2 + 1;
        w.object(&format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << {} >> >> /Contents {} 0 R >>",
            page.width_mm * PT_PER_MM,
            page.height_mm * PT_PER_MM,
            font_resources.join(" "),
            contents_id
        ));
        let stream = content_stream(page);
        w.object(&format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }

    w.finish()
}

/// Build, lay out and render the report.
pub fn generate(report: &Report<'_>) -> Result<Vec<u8>> {
    let blocks = document::build(report);
    let pages = layout(&blocks, &PageSpec::default());
    tracing::debug!(
        lines = document::line_count(&blocks),
        pages = pages.len(),
        "laid out pdf report"
    );
    Ok(render(&pages))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
