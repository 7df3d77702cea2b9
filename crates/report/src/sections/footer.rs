//! Footer pass, run once every content page exists.

use chrono::NaiveDate;

use hmsnova_core::types::Rgb;

use super::format_date;
use crate::canvas::PdfCanvas;
use crate::cursor::PageGeometry;
use crate::metrics::{text_width, truncate_to_width, Font};

const FOOTER_SIZE: f32 = 9.0;
const SEPARATOR_Y: f32 = 45.0;
const TEXT_Y: f32 = 30.0;
/// Minimum gap between the left footer text and the page label.
const GUTTER: f32 = 20.0;

pub fn page_label(page: usize, total: usize) -> String {
    format!("Page {page} of {total}")
}

pub fn footer_text(title: &str, generated_on: NaiveDate) -> String {
    format!("{title} — Generated: {}", format_date(generated_on))
}

/// Stamp separator, document line and `Page i of N` on every page.
pub fn render_footer(canvas: &mut PdfCanvas, geometry: &PageGeometry, title: &str, generated_on: NaiveDate) {
    let total = canvas.page_count();
    let left_full = footer_text(title, generated_on);

    for page in 0..total {
        canvas.draw_line(
            page,
            (geometry.margin_x, SEPARATOR_Y),
            (geometry.right_edge(), SEPARATOR_Y),
            0.5,
            Rgb::GRAY,
        );

        let label = page_label(page + 1, total);
        let label_width = text_width(&label, Font::Regular, FOOTER_SIZE);
        canvas.draw_text(
            page,
            geometry.right_edge() - label_width,
            TEXT_Y,
            &label,
            Font::Regular,
            FOOTER_SIZE,
            Rgb::GRAY,
        );

        let available = geometry.content_width() - label_width - GUTTER;
        let left = truncate_to_width(&left_full, Font::Regular, FOOTER_SIZE, available);
        canvas.draw_text(page, geometry.margin_x, TEXT_Y, &left, Font::Regular, FOOTER_SIZE, Rgb::GRAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(page_label(2, 5), "Page 2 of 5");
        assert_eq!(
            footer_text("Boring i betong", NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()),
            "Boring i betong — Generated: 16.10.2026"
        );
    }

    #[test]
    fn footer_is_stamped_on_every_page() {
        let geometry = PageGeometry::A4;
        let mut canvas = PdfCanvas::new(geometry.width, geometry.height);
        canvas.add_page();
        canvas.add_page();
        render_footer(
            &mut canvas,
            &geometry,
            "Boring i betong",
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        );

        let bytes = canvas
            .finish(&crate::canvas::DocumentInfo::default())
            .unwrap();
        let pdf = String::from_utf8_lossy(&bytes);
        for i in 1..=3 {
            assert!(pdf.contains(&format!("(Page {i} of 3)")), "missing page {i}");
        }
    }
}
