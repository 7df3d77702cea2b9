//! Cursor-driven text drawing on top of [`PdfCanvas`].
//!
//! Every section renderer takes a `&mut ReportWriter`. The writer owns the
//! canvas and the [`LayoutCursor`] for one generation; nothing outlives the
//! call to [`ReportWriter::into_canvas`].

use hmsnova_core::text::{wrap_by_chars, wrap_by_width, WrapMode};
use hmsnova_core::types::Rgb;

use crate::canvas::{ImageHandle, PdfCanvas};
use crate::cursor::{LayoutCursor, PageGeometry, BLOCK_RESERVE};
use crate::metrics::{text_width, Font};

pub const TITLE_SIZE: f32 = 18.0;
pub const HEADING_SIZE: f32 = 14.0;
pub const SUBHEADING_SIZE: f32 = 12.0;
pub const BODY_SIZE: f32 = 10.0;
pub const SMALL_SIZE: f32 = 9.0;

/// Vertical gap between a line's baseline and the next.
const LINE_GAP: f32 = 5.0;

/// Indent used for bullets and nested detail lines.
pub const DETAIL_INDENT: f32 = 15.0;

/// Height consumed by one line of text at `size`.
pub fn line_height(size: f32) -> f32 {
    size + LINE_GAP
}

pub struct ReportWriter {
    canvas: PdfCanvas,
    cursor: LayoutCursor,
    geometry: PageGeometry,
    wrap: WrapMode,
}

impl ReportWriter {
    pub fn new(geometry: PageGeometry, wrap: WrapMode) -> Self {
        Self {
            canvas: PdfCanvas::new(geometry.width, geometry.height),
            cursor: LayoutCursor::new(&geometry),
            geometry,
            wrap,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    pub fn canvas_mut(&mut self) -> &mut PdfCanvas {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> PdfCanvas {
        self.canvas
    }

    /// Reserve `required` points on the current page, breaking if needed.
    pub fn ensure_space(&mut self, required: f32) -> bool {
        self.cursor
            .ensure_space(&mut self.canvas, &self.geometry, required)
    }

    pub fn spacer(&mut self, amount: f32) {
        self.cursor.advance(amount);
    }

    /// Draw one line at the cursor and move down by `size + 5`.
    pub fn draw_text(&mut self, text: &str, size: f32, bold: bool, indent: f32, color: Rgb) {
        let x = self.geometry.margin_x + indent;
        self.canvas.draw_text(
            self.cursor.page_index,
            x,
            self.cursor.y,
            text,
            Font::for_weight(bold),
            size,
            color,
        );
        self.cursor.advance(line_height(size));
    }

    /// Break `text` into lines according to the configured wrap mode.
    ///
    /// The character budget only applies up to body size. Larger text is
    /// always wrapped against the available width.
    pub fn wrap_lines(&self, text: &str, size: f32, bold: bool, indent: f32) -> Vec<String> {
        match self.wrap {
            WrapMode::Characters(max) if size <= BODY_SIZE => wrap_by_chars(text, max),
            _ => {
                let font = Font::for_weight(bold);
                let available = self.geometry.content_width() - indent;
                wrap_by_width(text, available, |line| text_width(line, font, size))
            }
        }
    }

    /// Height a block of `lines` lines at `size` will take.
    pub fn block_height(lines: usize, size: f32) -> f32 {
        lines as f32 * line_height(size)
    }

    /// Wrapped text that may break across pages between lines.
    pub fn paragraph(&mut self, text: &str, size: f32, indent: f32, color: Rgb) {
        let lines = self.wrap_lines(text, size, false, indent);
        self.flow_lines(lines, size, false, indent, color);
    }

    /// Wrapped text kept together on one page. A block taller than an empty
    /// page flows line by line instead.
    pub fn keep_together(&mut self, text: &str, size: f32, bold: bool, indent: f32, color: Rgb) {
        let lines = self.wrap_lines(text, size, bold, indent);
        let height = Self::block_height(lines.len(), size);
        if height > self.geometry.usable_height() {
            self.flow_lines(lines, size, bold, indent, color);
            return;
        }
        self.ensure_space(height);
        for line in lines {
            self.draw_text(&line, size, bold, indent, color);
        }
    }

    fn flow_lines(&mut self, lines: Vec<String>, size: f32, bold: bool, indent: f32, color: Rgb) {
        for line in lines {
            self.ensure_space(line_height(size));
            self.draw_text(&line, size, bold, indent, color);
        }
    }

    /// A `• text` bullet whose wrapped lines never split across pages.
    pub fn bullet(&mut self, text: &str, size: f32, indent: f32, color: Rgb) {
        self.keep_together(&format!("• {text}"), size, false, indent, color);
    }

    /// Section heading. Reserves a default block below it so a heading is
    /// never stranded at the bottom of a page.
    pub fn heading(&mut self, text: &str) {
        self.ensure_space(BLOCK_RESERVE);
        self.draw_text(text, HEADING_SIZE, true, 0.0, Rgb::BLACK);
        self.spacer(2.0);
    }

    /// Draw an image with its top edge level with the current line's cap
    /// height, at absolute `x`.
    pub fn draw_image(&mut self, image: ImageHandle, x: f32, size: f32) {
        let bottom = self.cursor.y + BODY_SIZE - size;
        self.canvas
            .draw_image(self.cursor.page_index, image, x, bottom, size, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_text_moves_cursor_by_size_plus_gap() {
        let mut writer = ReportWriter::new(PageGeometry::A4, WrapMode::default());
        let start = writer.cursor().y;
        writer.draw_text("Linje", 12.0, false, 0.0, Rgb::BLACK);
        assert_eq!(writer.cursor().y, start - 17.0);
    }

    #[test]
    fn long_paragraph_flows_onto_new_pages() {
        let mut writer = ReportWriter::new(PageGeometry::A4, WrapMode::default());
        let text = "Sikring av arbeidsområdet rundt boreplassen. ".repeat(200);
        writer.paragraph(&text, BODY_SIZE, 0.0, Rgb::BLACK);
        let cursor = writer.cursor();
        assert!(cursor.page_index >= 1);
        assert!(cursor.y >= PageGeometry::A4.margin_bottom - line_height(BODY_SIZE));
    }

    #[test]
    fn kept_block_moves_whole_to_next_page() {
        let geometry = PageGeometry::A4;
        let mut writer = ReportWriter::new(geometry, WrapMode::Characters(20));
        // Leave room for two lines only.
        let room = geometry.margin_bottom + 2.0 * line_height(BODY_SIZE);
        writer.spacer(geometry.top_y() - room);

        writer.bullet("one two three four five six seven eight nine ten", BODY_SIZE, 0.0, Rgb::BLACK);

        let cursor = writer.cursor();
        assert_eq!(cursor.page_index, 1);
        let lines = writer.wrap_lines("• one two three four five six seven eight nine ten", BODY_SIZE, false, 0.0);
        assert!(lines.len() > 2);
        let expected = geometry.top_y() - ReportWriter::block_height(lines.len(), BODY_SIZE);
        assert!((cursor.y - expected).abs() < 1e-3);
    }

    #[test]
    fn oversized_bullet_flows_across_pages() {
        let geometry = PageGeometry::A4;
        let mut writer = ReportWriter::new(geometry, WrapMode::default());
        writer.draw_text("Tiltak", BODY_SIZE, false, 0.0, Rgb::BLACK);
        let text = "Sperr av området og kontroller sikringen før arbeidet starter. ".repeat(80);
        let lines = writer.wrap_lines(&format!("• {text}"), BODY_SIZE, false, 0.0);
        assert!(lines.len() >= 65);

        writer.bullet(&text, BODY_SIZE, 0.0, Rgb::BLACK);

        let cursor = writer.cursor();
        // First page is shared with the line above; nothing goes below the margin.
        assert_eq!(cursor.page_index, 1);
        assert!(cursor.y >= geometry.margin_bottom - line_height(BODY_SIZE));
        assert_eq!(writer.into_canvas().page_count(), 2);
    }

    #[test]
    fn oversized_block_at_page_top_adds_no_blank_page() {
        let geometry = PageGeometry::A4;
        let mut writer = ReportWriter::new(geometry, WrapMode::default());
        let text = "Kontroller fallsikringen før hver bruk. ".repeat(120);

        writer.bullet(&text, BODY_SIZE, 0.0, Rgb::BLACK);

        let lines = writer.wrap_lines(&format!("• {text}"), BODY_SIZE, false, 0.0);
        let per_page = (geometry.usable_height() / line_height(BODY_SIZE)).floor() as usize;
        let expected_pages = lines.len().div_ceil(per_page);
        assert_eq!(writer.into_canvas().page_count(), expected_pages);
    }

    #[test]
    fn large_text_wraps_by_width_in_character_mode() {
        let writer = ReportWriter::new(PageGeometry::A4, WrapMode::Characters(80));
        let title = "Utskifting av hovedtavle og omlegging av kabelføringer i teknisk rom ".repeat(2);
        let available = PageGeometry::A4.content_width();
        let lines = writer.wrap_lines(&title, TITLE_SIZE, true, 0.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Bold, TITLE_SIZE) <= available, "too wide: {line}");
        }
    }

    #[test]
    fn measured_wrap_respects_available_width() {
        let writer = ReportWriter::new(PageGeometry::A4, WrapMode::Measured);
        let text = "Boring i betong med diamantbor krever vannkjøling og avsug. ".repeat(10);
        let available = PageGeometry::A4.content_width() - DETAIL_INDENT;
        for line in writer.wrap_lines(&text, BODY_SIZE, false, DETAIL_INDENT) {
            assert!(text_width(&line, Font::Regular, BODY_SIZE) <= available);
        }
    }
}
