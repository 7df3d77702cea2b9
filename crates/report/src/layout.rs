//! Pure placement math for pictogram rows.

use crate::cursor::PageGeometry;

pub const ICON_SIZE: f32 = 20.0;
/// Horizontal advance from one icon to the next.
pub const ICON_SPACING: f32 = 25.0;
/// Offset of the first icon from the left margin.
pub const ICON_INDENT: f32 = 10.0;
/// Vertical gap below each row.
pub const ICON_ROW_GAP: f32 = 5.0;

/// Height one icon row consumes.
pub const ICON_ROW_HEIGHT: f32 = ICON_SIZE + ICON_ROW_GAP;

/// Position of one icon: zero-based row and left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconSlot {
    pub row: usize,
    pub x: f32,
}

/// Icons that fit on one row: `floor(content_width / ICON_SPACING)`, at
/// least one.
pub fn icons_per_row(geometry: &PageGeometry) -> usize {
    ((geometry.content_width() / ICON_SPACING).floor() as usize).max(1)
}

/// Lay `count` icons out left to right, starting a new row once
/// [`icons_per_row`] icons have been placed.
pub fn layout_icon_row(count: usize, geometry: &PageGeometry) -> Vec<IconSlot> {
    let start_x = geometry.margin_x + ICON_INDENT;
    let per_row = icons_per_row(geometry);

    (0..count)
        .map(|idx| IconSlot {
            row: idx / per_row,
            x: start_x + (idx % per_row) as f32 * ICON_SPACING,
        })
        .collect()
}

/// Number of rows `count` icons occupy.
pub fn row_count(count: usize, geometry: &PageGeometry) -> usize {
    layout_icon_row(count, geometry)
        .last()
        .map_or(0, |slot| slot.row + 1)
}
