use hmsnova_core::sja::SjaRecord;
use hmsnova_core::types::Rgb;

use super::format_date;
use crate::writer::{ReportWriter, BODY_SIZE, SMALL_SIZE, TITLE_SIZE};

/// Title block: document kind, title, record metadata and description.
pub fn render_header(writer: &mut ReportWriter, record: &SjaRecord) {
    writer.draw_text("Safe Job Analysis (SJA)", SMALL_SIZE, false, 0.0, Rgb::GRAY);
    writer.keep_together(&record.title, TITLE_SIZE, true, 0.0, Rgb::BLACK);
    writer.spacer(4.0);

    for line in metadata_lines(record) {
        writer.draw_text(&line, BODY_SIZE, false, 0.0, Rgb::BLACK);
    }

    if let Some(description) = record.description.as_deref().filter(|d| !d.trim().is_empty()) {
        writer.spacer(6.0);
        writer.paragraph(description, BODY_SIZE, 0.0, Rgb::BLACK);
    }
    writer.spacer(12.0);
}

fn metadata_lines(record: &SjaRecord) -> Vec<String> {
    let mut lines = vec![format!("Status: {}", record.status)];
    if let Some(site) = record.work_site.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Work site: {site}"));
    }
    if let Some(date) = record.scheduled_date {
        lines.push(format!("Scheduled: {}", format_date(date)));
    }
    if let Some(author) = record.created_by.as_deref().filter(|a| !a.is_empty()) {
        lines.push(format!("Created by: {author}"));
    }
    if let Some(created) = record.created_at {
        lines.push(format!("Created: {}", format_date(created.date_naive())));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> SjaRecord {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "companyId": 1,
            "title": "Boring i betong",
            "status": "APPROVED",
            "workSite": "Parkeringskjeller B2",
            "createdBy": "Kari Nordmann"
        }))
        .unwrap()
    }

    #[test]
    fn absent_fields_are_omitted() {
        let lines = metadata_lines(&record());
        assert_eq!(
            lines,
            vec![
                "Status: APPROVED",
                "Work site: Parkeringskjeller B2",
                "Created by: Kari Nordmann",
            ]
        );
    }

    #[test]
    fn scheduled_date_uses_norwegian_format() {
        let mut record = record();
        record.scheduled_date = NaiveDate::from_ymd_opt(2026, 3, 9);
        assert!(metadata_lines(&record).contains(&"Scheduled: 09.03.2026".to_string()));
    }
}
