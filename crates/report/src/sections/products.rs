//! Chemical product block with hazard and PPE pictogram rows.

use hmsnova_core::sja::ChemicalProductRef;
use hmsnova_core::types::Rgb;

use crate::canvas::ImageHandle;
use crate::icons::{IconLoader, LoadedIcon};
use crate::layout::{layout_icon_row, ICON_ROW_HEIGHT, ICON_SIZE};
use crate::writer::{line_height, ReportWriter, BODY_SIZE, DETAIL_INDENT, SUBHEADING_SIZE};

/// Render every product. Icon files for one product are read concurrently.
pub async fn render_products(
    writer: &mut ReportWriter,
    products: &[ChemicalProductRef],
    icons: &IconLoader,
) {
    if products.is_empty() {
        return;
    }
    writer.heading("Chemical Products");

    for product in products {
        let (hazard_icons, ppe_icons) = futures::join!(
            icons.load_hazard_icons(&product.hazard_symbols),
            icons.load_ppe_icons(&product.ppe_symbols),
        );
        render_product(writer, product, &hazard_icons, &ppe_icons);
    }
    writer.spacer(6.0);
}

fn render_product(
    writer: &mut ReportWriter,
    product: &ChemicalProductRef,
    hazard_icons: &[LoadedIcon],
    ppe_icons: &[LoadedIcon],
) {
    let manufacturer = product
        .manufacturer
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(|m| format!("Manufacturer: {m}"));

    let mut group = line_height(SUBHEADING_SIZE);
    if manufacturer.is_some() {
        group += line_height(BODY_SIZE);
    }
    writer.ensure_space(group);

    writer.draw_text(&product.product_name, SUBHEADING_SIZE, true, 0.0, Rgb::BLACK);
    if let Some(line) = manufacturer {
        writer.draw_text(&line, BODY_SIZE, false, DETAIL_INDENT, Rgb::BLACK);
    }
    if let Some(description) = product.description.as_deref().filter(|d| !d.trim().is_empty()) {
        writer.paragraph(description, BODY_SIZE, DETAIL_INDENT, Rgb::BLACK);
    }

    draw_icon_group(writer, "Hazard symbols:", hazard_icons);
    draw_icon_group(writer, "Required PPE:", ppe_icons);

    if let Some(class) = product.hazard_class.as_deref().filter(|c| !c.is_empty()) {
        writer.ensure_space(line_height(BODY_SIZE));
        writer.draw_text(&format!("Hazard class: {class}"), BODY_SIZE, false, DETAIL_INDENT, Rgb::BLACK);
    }
    if let Some(un) = product.un_number.as_deref().filter(|u| !u.is_empty()) {
        writer.ensure_space(line_height(BODY_SIZE));
        writer.draw_text(&format!("UN number: {un}"), BODY_SIZE, false, DETAIL_INDENT, Rgb::BLACK);
    }
    writer.spacer(8.0);
}

/// A label followed by one or more icon rows. The label is kept with the
/// first row, and each row reserves its own height before drawing.
fn draw_icon_group(writer: &mut ReportWriter, label: &str, icons: &[LoadedIcon]) {
    let handles: Vec<ImageHandle> = icons
        .iter()
        .filter_map(|icon| match writer.canvas_mut().embed_png(&icon.png) {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(symbol = icon.code, error = %e, "Icon could not be embedded, skipping");
                None
            }
        })
        .collect();
    if handles.is_empty() {
        return;
    }

    writer.ensure_space(line_height(BODY_SIZE) + ICON_ROW_HEIGHT);
    writer.draw_text(label, BODY_SIZE, true, DETAIL_INDENT, Rgb::BLACK);

    let slots = layout_icon_row(handles.len(), writer.geometry());
    let mut current_row = None;
    for (handle, slot) in handles.into_iter().zip(slots) {
        if current_row != Some(slot.row) {
            if current_row.is_some() {
                writer.spacer(ICON_ROW_HEIGHT);
            }
            writer.ensure_space(ICON_ROW_HEIGHT);
            current_row = Some(slot.row);
        }
        writer.draw_image(handle, slot.x, ICON_SIZE);
    }
    writer.spacer(ICON_ROW_HEIGHT);
}
