//! Page canvas: executes draw operations onto PDF pages
//!
//! Owns the pdf-writer document, the page lifecycle and the text cursor.
//! Line wrapping and overflow page breaks happen here; forced breaks
//! arrive as `AddPage` operations from the layout engine, which never
//! tracks remaining vertical space itself.
//!
//! Every page carries the report chrome: a header with the logo (or a
//! solid accent block when no logo is available), the right-aligned report
//! title and a separator rule, plus a centered page-number footer.

use log::debug;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::fonts::{FontProvider, FontStyle};
use crate::logo::{Logo, LOGO_NAME};
use crate::ops::{Align, DrawOp};
use crate::theme::{self, Color};
use crate::winansi;

// A4 geometry in points (one mm is 2.8346 pt).
const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN_LEFT: f64 = 28.35;
const MARGIN_RIGHT: f64 = 28.35;
// Overflow threshold near the page bottom (15 mm).
const MARGIN_BOTTOM: f64 = 42.52;
const CONTENT_WIDTH: f64 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
// Body content starts below the header chrome (45 mm from the top).
const CONTENT_TOP: f64 = 127.56;

const LOGO_TOP: f64 = 28.35;
const LOGO_WIDTH: f64 = 113.39;
const FALLBACK_BLOCK_HEIGHT: f64 = 42.52;
const HEADER_TITLE_BASELINE: f64 = PAGE_HEIGHT - 62.0;
const SEPARATOR_Y: f64 = PAGE_HEIGHT - 99.21;
const SEPARATOR_WIDTH: f64 = 1.42;
const FOOTER_BASELINE: f64 = 31.0;
const ACCENT_BAR_WIDTH: f64 = 2.83;

/// Per-page header/footer configuration, fixed for the whole document.
pub struct PageChrome {
    pub title: String,
    pub logo: Option<Logo>,
}

struct PageInProgress {
    page_id: Ref,
    content_id: Ref,
    content: Content,
}

pub struct PageCanvas {
    pdf: Pdf,
    fonts: FontProvider,
    chrome: PageChrome,
    page_tree_id: Ref,
    next_ref_id: i32,
    pages: Vec<Ref>,
    current: Option<PageInProgress>,
    font_ids: [(Name<'static>, Ref); 3],
    logo_ref: Option<Ref>,
    font_style: FontStyle,
    font_size: f64,
    text_color: Color,
    cursor_y: f64,
}

impl PageCanvas {
    pub fn new(fonts: FontProvider, chrome: PageChrome) -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        pdf.catalog(catalog_id).pages(page_tree_id);

        let mut next_ref_id = 3;
        let font_ids = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic].map(|style| {
            let id = Ref::new(next_ref_id);
            next_ref_id += 1;
            pdf.type1_font(id).base_font(FontProvider::base_font(style));
            (FontProvider::resource_name(style), id)
        });

        debug!("typesetting with the built-in {} family", fonts.default_family());

        let mut logo_ref = None;
        if let Some(logo) = &chrome.logo {
            let image_id = Ref::new(next_ref_id);
            let smask_id = Ref::new(next_ref_id + 1);
            next_ref_id += 2;
            logo.embed(&mut pdf, image_id, smask_id);
            logo_ref = Some(image_id);
        }

        Self {
            pdf,
            fonts,
            chrome,
            page_tree_id,
            next_ref_id,
            pages: Vec::new(),
            current: None,
            font_ids,
            logo_ref,
            font_style: FontStyle::Regular,
            font_size: theme::BODY_SIZE,
            text_color: theme::BODY,
            cursor_y: 0.0,
        }
    }

    /// Execute an ordered operation sequence.
    pub fn run(&mut self, ops: &[DrawOp]) {
        for op in ops {
            match op {
                DrawOp::AddPage => self.add_page(),
                DrawOp::SetFont { style, size } => {
                    self.font_style = *style;
                    self.font_size = *size;
                }
                DrawOp::SetTextColor(color) => self.text_color = *color,
                DrawOp::Cell {
                    text,
                    height,
                    align,
                    indent,
                    underline,
                } => self.cell(text, *height, *align, *indent, *underline),
                DrawOp::Paragraph { text, line_height } => self.paragraph(text, *line_height),
                DrawOp::AccentBar { height } => self.accent_bar(*height),
                DrawOp::Spacer { height } => self.cursor_y -= *height,
            }
        }
    }

    /// Number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Finalize the document and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.finish_page();
        let mut page_tree = self.pdf.pages(self.page_tree_id);
        page_tree.kids(self.pages.iter().copied());
        page_tree.count(self.pages.len() as i32);
        page_tree.finish();
        self.pdf.finish()
    }

    fn alloc_ref(&mut self) -> Ref {
        let r = Ref::new(self.next_ref_id);
        self.next_ref_id += 1;
        r
    }

    fn add_page(&mut self) {
        self.finish_page();
        let page_id = self.alloc_ref();
        let content_id = self.alloc_ref();
        self.pages.push(page_id);
        let mut content = Content::new();
        self.draw_header(&mut content);
        self.current = Some(PageInProgress {
            page_id,
            content_id,
            content,
        });
        self.cursor_y = PAGE_HEIGHT - CONTENT_TOP;
    }

    /// Close out the page in progress: footer, content stream, page object
    /// with its font and image resources.
    fn finish_page(&mut self) {
        let Some(mut page) = self.current.take() else {
            return;
        };
        self.draw_footer(&mut page.content);
        let bytes = page.content.finish();
        self.pdf.stream(page.content_id, &bytes);

        let mut p = self.pdf.page(page.page_id);
        p.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH as f32, PAGE_HEIGHT as f32));
        p.parent(self.page_tree_id);
        p.contents(page.content_id);
        {
            let mut resources = p.resources();
            {
                let mut fonts = resources.fonts();
                for (name, id) in self.font_ids {
                    fonts.pair(name, id);
                }
            }
            if let Some(id) = self.logo_ref {
                resources.x_objects().pair(LOGO_NAME, id);
            }
        }
        p.finish();
    }

    fn draw_header(&self, content: &mut Content) {
        match (&self.chrome.logo, self.logo_ref) {
            (Some(logo), Some(_)) => {
                let height = LOGO_WIDTH * logo.aspect();
                content.save_state();
                content.transform([
                    LOGO_WIDTH as f32,
                    0.0,
                    0.0,
                    height as f32,
                    MARGIN_LEFT as f32,
                    (PAGE_HEIGHT - LOGO_TOP - height) as f32,
                ]);
                content.x_object(LOGO_NAME);
                content.restore_state();
            }
            _ => {
                // Solid-color fallback block where the logo would sit.
                set_fill(content, theme::ACCENT);
                content.rect(
                    MARGIN_LEFT as f32,
                    (PAGE_HEIGHT - LOGO_TOP - FALLBACK_BLOCK_HEIGHT) as f32,
                    LOGO_WIDTH as f32,
                    FALLBACK_BLOCK_HEIGHT as f32,
                );
                content.fill_nonzero();
            }
        }

        let title = self.chrome.title.as_str();
        let title_width = self.fonts.text_width(title, theme::APP_TITLE_SIZE);
        show_text(
            content,
            FontStyle::Bold,
            theme::APP_TITLE_SIZE,
            theme::TEXT_HEADER,
            PAGE_WIDTH - MARGIN_RIGHT - title_width,
            HEADER_TITLE_BASELINE,
            title,
        );

        set_stroke(content, theme::PRIMARY);
        content.set_line_width(SEPARATOR_WIDTH as f32);
        content.move_to(MARGIN_LEFT as f32, SEPARATOR_Y as f32);
        content.line_to((PAGE_WIDTH - MARGIN_RIGHT) as f32, SEPARATOR_Y as f32);
        content.stroke();
    }

    fn draw_footer(&self, content: &mut Content) {
        let label = format!("{} {}", theme::labels::PAGE_PREFIX, self.pages.len());
        let width = self.fonts.text_width(&label, theme::FOOTER_SIZE);
        show_text(
            content,
            FontStyle::Italic,
            theme::FOOTER_SIZE,
            theme::FOOTER,
            (PAGE_WIDTH - width) / 2.0,
            FOOTER_BASELINE,
            &label,
        );
    }

    /// Break the page when the next slice of content would not fit.
    fn ensure_space(&mut self, needed: f64) {
        if self.current.is_none() {
            self.add_page();
        } else if self.cursor_y - needed < MARGIN_BOTTOM {
            debug!("content overflow at y={:.1}, breaking page", self.cursor_y);
            self.add_page();
        }
    }

    fn cell(&mut self, text: &str, height: f64, align: Align, indent: f64, underline: bool) {
        self.ensure_space(height);
        let (style, size, color) = (self.font_style, self.font_size, self.text_color);
        let width = self.fonts.text_width(text, size);
        let x = match align {
            Align::Left => MARGIN_LEFT + indent,
            Align::Center => MARGIN_LEFT + (CONTENT_WIDTH - width) / 2.0,
            Align::Right => PAGE_WIDTH - MARGIN_RIGHT - width,
        };
        let baseline = self.cursor_y - height / 2.0 - size * 0.3;
        let bottom = self.cursor_y - height;
        if let Some(page) = self.current.as_mut() {
            show_text(&mut page.content, style, size, color, x, baseline, text);
            if underline {
                set_stroke(&mut page.content, color);
                page.content.set_line_width(0.6);
                page.content.move_to(MARGIN_LEFT as f32, bottom as f32);
                page.content
                    .line_to((PAGE_WIDTH - MARGIN_RIGHT) as f32, bottom as f32);
                page.content.stroke();
            }
        }
        self.cursor_y = bottom;
    }

    fn paragraph(&mut self, text: &str, line_height: f64) {
        let size = self.font_size;
        for raw_line in text.split('\n') {
            if raw_line.trim().is_empty() {
                self.ensure_space(line_height);
                self.cursor_y -= line_height;
                continue;
            }
            for line in self.wrap(raw_line, size) {
                self.ensure_space(line_height);
                let (style, color) = (self.font_style, self.text_color);
                let baseline = self.cursor_y - line_height * 0.75;
                if let Some(page) = self.current.as_mut() {
                    show_text(
                        &mut page.content,
                        style,
                        size,
                        color,
                        MARGIN_LEFT,
                        baseline,
                        &line,
                    );
                }
                self.cursor_y -= line_height;
            }
        }
    }

    /// Word-based line breaking against the content width. A word wider
    /// than the whole line is placed alone and left to overrun.
    fn wrap(&self, text: &str, size: f64) -> Vec<String> {
        let space = self.fonts.text_width(" ", size);
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut line_width = 0.0;
        for word in text.split_whitespace() {
            let word_width = self.fonts.text_width(word, size);
            let needed = if line.is_empty() {
                word_width
            } else {
                line_width + space + word_width
            };
            if needed <= CONTENT_WIDTH || line.is_empty() {
                if !line.is_empty() {
                    line.push(' ');
                    line_width += space;
                }
                line.push_str(word);
                line_width += word_width;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
                line_width = word_width;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }

    fn accent_bar(&mut self, height: f64) {
        self.ensure_space(height);
        let top = self.cursor_y;
        if let Some(page) = self.current.as_mut() {
            set_stroke(&mut page.content, theme::PRIMARY);
            page.content.set_line_width(ACCENT_BAR_WIDTH as f32);
            page.content.move_to(MARGIN_LEFT as f32, top as f32);
            page.content
                .line_to(MARGIN_LEFT as f32, (top - height) as f32);
            page.content.stroke();
        }
    }
}

fn set_fill(content: &mut Content, color: Color) {
    content.set_fill_rgb(color.r as f32, color.g as f32, color.b as f32);
}

fn set_stroke(content: &mut Content, color: Color) {
    content.set_stroke_rgb(color.r as f32, color.g as f32, color.b as f32);
}

fn show_text(
    content: &mut Content,
    style: FontStyle,
    size: f64,
    color: Color,
    x: f64,
    y: f64,
    text: &str,
) {
    set_fill(content, color);
    content.begin_text();
    content.set_font(FontProvider::resource_name(style), size as f32);
    content.next_line(x as f32, y as f32);
    content.show(Str(&winansi::encode(text)));
    content.end_text();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> PageCanvas {
        PageCanvas::new(
            FontProvider::new(),
            PageChrome {
                title: "Reporte".to_string(),
                logo: None,
            },
        )
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn empty_op_list_produces_a_valid_document() {
        let bytes = canvas().finish();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn forced_breaks_create_pages() {
        let mut c = canvas();
        c.run(&[DrawOp::AddPage, DrawOp::AddPage, DrawOp::AddPage]);
        assert_eq!(c.page_count(), 3);
        let bytes = c.finish();
        assert!(contains(&bytes, b"/Count 3"));
    }

    #[test]
    fn long_paragraph_overflows_onto_a_new_page() {
        let mut c = canvas();
        let text = "palabra ".repeat(4000);
        c.run(&[
            DrawOp::AddPage,
            DrawOp::Paragraph {
                text,
                line_height: 17.0,
            },
        ]);
        assert!(c.page_count() > 1);
    }

    #[test]
    fn cell_text_lands_in_the_content_stream() {
        let mut c = canvas();
        c.run(&[
            DrawOp::AddPage,
            DrawOp::Cell {
                text: "hola mundo".to_string(),
                height: 17.0,
                align: Align::Left,
                indent: 0.0,
                underline: false,
            },
        ]);
        let bytes = c.finish();
        assert!(contains(&bytes, b"hola mundo"));
    }

    #[test]
    fn wrapping_respects_the_content_width() {
        let c = canvas();
        let lines = c.wrap(&"ancho ".repeat(60), 11.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(c.fonts.text_width(line, 11.0) <= CONTENT_WIDTH + 1e-6);
        }
    }
}
