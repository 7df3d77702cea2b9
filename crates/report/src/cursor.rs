//! Page geometry and the vertical layout cursor.

use crate::canvas::PdfCanvas;

/// Default vertical reservation for a block whose height is not computed.
pub const BLOCK_RESERVE: f32 = 130.0;

/// Fixed page dimensions and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// A4 portrait with 50 pt side and top margins and room for the footer.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin_x: 50.0,
        margin_top: 50.0,
        margin_bottom: 60.0,
    };

    /// Baseline of the first line on a fresh page.
    pub fn top_y(&self) -> f32 {
        self.height - self.margin_top
    }

    /// Right edge of the content area.
    pub fn right_edge(&self) -> f32 {
        self.width - self.margin_x
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin_x
    }

    /// Vertical room on an empty page, from the first baseline down to the
    /// bottom margin.
    pub fn usable_height(&self) -> f32 {
        self.top_y() - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Current drawing position: which page, and the baseline of the next line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page_index: usize,
    pub y: f32,
}

impl LayoutCursor {
    /// Cursor at the top of the first page.
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            page_index: 0,
            y: geometry.top_y(),
        }
    }

    /// Start a new page when fewer than `required` points remain above the
    /// bottom margin. Returns `true` when a page was added.
    pub fn ensure_space(&mut self, canvas: &mut PdfCanvas, geometry: &PageGeometry, required: f32) -> bool {
        if self.y - required >= geometry.margin_bottom {
            return false;
        }
        self.page_index = canvas.add_page();
        self.y = geometry.top_y();
        true
    }

    pub fn advance(&mut self, amount: f32) {
        self.y -= amount;
    }
}
