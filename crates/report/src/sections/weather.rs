//! Weather forecast block.
//!
//! The snapshot is parsed at this boundary. A snapshot that cannot be parsed
//! never fails the report; a red marker line takes the block's place.

use chrono::NaiveDate;

use hmsnova_core::types::Rgb;
use hmsnova_core::weather::{humanize_symbol_code, parse_weather, DailyWeatherSummary, WeatherReport};

use super::format_date;
use crate::writer::{line_height, ReportWriter, BODY_SIZE, DETAIL_INDENT, SMALL_SIZE, SUBHEADING_SIZE};

pub const PARSE_ERROR_MARKER: &str = "Weather data could not be read";

/// Render the weather block for a raw location snapshot, if there is one.
pub fn render_weather(writer: &mut ReportWriter, location: Option<&str>) {
    let Some(raw) = location.filter(|raw| !raw.trim().is_empty()) else {
        return;
    };

    writer.heading("Weather Forecast");

    let report = match parse_weather(raw) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse weather data for report");
            writer.draw_text(PARSE_ERROR_MARKER, BODY_SIZE, false, 0.0, Rgb::RED);
            writer.spacer(10.0);
            return;
        }
    };

    if let Some(line) = location_line(&report) {
        writer.draw_text(&line, BODY_SIZE, false, 0.0, Rgb::GRAY);
        writer.spacer(3.0);
    }

    if report.days.is_empty() {
        writer.draw_text("No forecast available", BODY_SIZE, false, 0.0, Rgb::GRAY);
    }

    for day in &report.days {
        let details = day_lines(day);
        let height = line_height(SUBHEADING_SIZE)
            + details.len() as f32 * line_height(BODY_SIZE)
            + line_height(BODY_SIZE)
            + 4.0;
        writer.ensure_space(height);

        writer.draw_text(&day_title(day), SUBHEADING_SIZE, true, 0.0, Rgb::BLACK);
        for line in &details {
            writer.draw_text(line, BODY_SIZE, false, DETAIL_INDENT, Rgb::BLACK);
        }
        let (risk_text, color) = match (day.risk_label.as_deref(), day.risk_level()) {
            (Some(label), Some(level)) => (format!("Weather risk: {label}"), level.color()),
            (Some(label), None) => (format!("Weather risk: {label}"), Rgb::BLACK),
            (None, _) => ("Weather risk: Unknown".to_string(), Rgb::GRAY),
        };
        writer.draw_text(&risk_text, BODY_SIZE, true, DETAIL_INDENT, color);
        writer.spacer(4.0);
    }

    if let Some(line) = source_line(&report) {
        writer.ensure_space(line_height(SMALL_SIZE));
        writer.draw_text(&line, SMALL_SIZE, false, 0.0, Rgb::GRAY);
    }
    writer.spacer(10.0);
}

fn location_line(report: &WeatherReport) -> Option<String> {
    let coords = match (report.latitude, report.longitude) {
        (Some(lat), Some(lon)) => Some(format!("{lat:.4}, {lon:.4}")),
        _ => None,
    };
    match (report.location_name.as_deref(), coords) {
        (Some(name), Some(coords)) => Some(format!("Location: {name} ({coords})")),
        (Some(name), None) => Some(format!("Location: {name}")),
        (None, Some(coords)) => Some(format!("Location: {coords}")),
        (None, None) => None,
    }
}

fn day_title(day: &DailyWeatherSummary) -> String {
    let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
        .map(format_date)
        .unwrap_or_else(|_| day.date.clone());
    match (day.day.is_empty(), date.is_empty()) {
        (false, false) => format!("{} {}", day.day, date),
        (false, true) => day.day.clone(),
        _ => date,
    }
}

fn day_lines(day: &DailyWeatherSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(code) = day.symbol_code.as_deref() {
        lines.push(format!("Conditions: {}", humanize_symbol_code(code)));
    }
    match (day.min_temp, day.max_temp) {
        (Some(min), Some(max)) => lines.push(format!("Temperature: {min:.1} °C to {max:.1} °C")),
        (Some(t), None) | (None, Some(t)) => lines.push(format!("Temperature: {t:.1} °C")),
        (None, None) => {}
    }
    if let Some(wind) = day.max_wind {
        lines.push(format!("Max wind: {wind:.1} m/s"));
    }
    if let Some(precip) = day.total_precipitation {
        lines.push(format!("Precipitation: {precip:.1} mm"));
    }
    lines
}

fn source_line(report: &WeatherReport) -> Option<String> {
    match (report.source.as_deref(), report.timestamp.as_deref()) {
        (Some(source), Some(ts)) => Some(format!("Source: {source}, updated {ts}")),
        (Some(source), None) => Some(format!("Source: {source}")),
        (None, Some(ts)) => Some(format!("Updated {ts}")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DailyWeatherSummary {
        DailyWeatherSummary {
            day: "Monday".into(),
            date: "2026-03-02".into(),
            symbol_code: Some("partlycloudy_day".into()),
            min_temp: Some(-2.0),
            max_temp: Some(4.5),
            max_wind: Some(6.2),
            total_precipitation: Some(0.4),
            risk_label: Some("Medium".into()),
        }
    }

    #[test]
    fn day_lines_humanize_and_format() {
        assert_eq!(day_title(&day()), "Monday 02.03.2026");
        assert_eq!(
            day_lines(&day()),
            vec![
                "Conditions: partlycloudy day",
                "Temperature: -2.0 °C to 4.5 °C",
                "Max wind: 6.2 m/s",
                "Precipitation: 0.4 mm",
            ]
        );
    }

    #[test]
    fn unparseable_date_is_shown_raw() {
        let mut d = day();
        d.date = "i morgen".into();
        assert_eq!(day_title(&d), "Monday i morgen");
    }

    #[test]
    fn location_and_source_lines() {
        let report = WeatherReport {
            location_name: Some("Oslo".into()),
            latitude: Some(59.9139),
            longitude: Some(10.7522),
            source: Some("MET Norway".into()),
            ..WeatherReport::default()
        };
        assert_eq!(
            location_line(&report).as_deref(),
            Some("Location: Oslo (59.9139, 10.7522)")
        );
        assert_eq!(source_line(&report).as_deref(), Some("Source: MET Norway"));
        assert_eq!(location_line(&WeatherReport::default()), None);
    }
}
