//! Location / weather snapshot normalization.
//!
//! The `location` blob stored on an SJA comes in two shapes:
//!
//! - **Aggregated**: `{ forecasts: [{ day, date, symbolCode, minTemp, maxTemp,
//!   maxWind, totalPrecipitation, riskLevel }], timestamp, source }`
//! - **Raw time series** (MET Norway locationforecast):
//!   `{ properties: { timeseries: [{ time, data: { instant, next_1_hours |
//!   next_6_hours } }] } }`, bucketed into days here.
//!
//! Both are normalized into one [`WeatherReport`] so renderers never branch
//! on the payload shape. Either shape may also be nested under a `weather`
//! key next to the location's `name` / `latitude` / `longitude`.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Weekday};
use serde::Deserialize;

use crate::risk::RiskLevel;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of days kept from a raw time series.
pub const MAX_RAW_FORECAST_DAYS: usize = 3;

/// Wind speed (m/s) above which a day is high risk.
pub const HIGH_WIND: f64 = 15.0;
/// Daily precipitation (mm) above which a day is high risk.
pub const HIGH_PRECIPITATION: f64 = 5.0;
/// Minimum temperature (°C) below which a day is high risk.
pub const HIGH_COLD: f64 = -10.0;
/// Maximum temperature (°C) above which a day is high risk.
pub const HIGH_HEAT: f64 = 30.0;

/// Wind speed (m/s) above which a day is medium risk.
pub const MEDIUM_WIND: f64 = 8.0;
/// Daily precipitation (mm) above which a day is medium risk.
pub const MEDIUM_PRECIPITATION: f64 = 1.0;
/// Minimum temperature (°C) below which a day is medium risk.
pub const MEDIUM_COLD: f64 = 0.0;
/// Maximum temperature (°C) above which a day is medium risk.
pub const MEDIUM_HEAT: f64 = 25.0;

// ---------------------------------------------------------------------------
// Normalized output
// ---------------------------------------------------------------------------

/// One day of weather, whichever shape it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeatherSummary {
    /// Display name of the day (`Monday`, or whatever the aggregated data said).
    pub day: String,
    /// ISO date string.
    pub date: String,
    pub symbol_code: Option<String>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub max_wind: Option<f64>,
    pub total_precipitation: Option<f64>,
    /// Risk label as shown in the report.
    pub risk_label: Option<String>,
}

impl DailyWeatherSummary {
    /// The risk level, if the label is one we recognise.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_label.as_deref().and_then(RiskLevel::from_label)
    }
}

/// A normalized weather snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherReport {
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub days: Vec<DailyWeatherSummary>,
    pub source: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("location data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("location data must be a JSON object")]
    NotAnObject,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregatedForecast {
    #[serde(default)]
    day: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    symbol_code: Option<String>,
    #[serde(default)]
    min_temp: Option<f64>,
    #[serde(default)]
    max_temp: Option<f64>,
    #[serde(default)]
    max_wind: Option<f64>,
    #[serde(default)]
    total_precipitation: Option<f64>,
    #[serde(default)]
    risk_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesEntry {
    time: String,
    data: TimeseriesData,
}

#[derive(Debug, Deserialize)]
struct TimeseriesData {
    #[serde(default)]
    instant: Option<Instant>,
    #[serde(default)]
    next_1_hours: Option<Period>,
    #[serde(default)]
    next_6_hours: Option<Period>,
}

#[derive(Debug, Deserialize)]
struct Instant {
    #[serde(default)]
    details: InstantDetails,
}

#[derive(Debug, Default, Deserialize)]
struct InstantDetails {
    #[serde(default)]
    air_temperature: Option<f64>,
    #[serde(default)]
    wind_speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Period {
    #[serde(default)]
    summary: Option<PeriodSummary>,
    #[serde(default)]
    details: Option<PeriodDetails>,
}

#[derive(Debug, Deserialize)]
struct PeriodSummary {
    symbol_code: String,
}

#[derive(Debug, Deserialize)]
struct PeriodDetails {
    #[serde(default)]
    precipitation_amount: Option<f64>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse and normalize a raw `location` blob.
///
/// An object that carries neither forecast shape yields a report with no
/// days (the location name, if any, is still kept).
pub fn parse_weather(raw: &str) -> Result<WeatherReport, WeatherError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let root = value.as_object().ok_or(WeatherError::NotAnObject)?;

    let mut report = WeatherReport {
        location_name: string_field(root, &["name", "locationName", "address"]),
        latitude: number_field(root, &["latitude", "lat"]),
        longitude: number_field(root, &["longitude", "lon", "lng"]),
        ..WeatherReport::default()
    };

    let weather = root
        .get("weather")
        .and_then(|w| w.as_object())
        .unwrap_or(root);

    report.source = string_field(weather, &["source"]);
    report.timestamp = string_field(weather, &["timestamp", "updatedAt"]);

    if let Some(forecasts) = weather.get("forecasts") {
        let forecasts: Vec<AggregatedForecast> = serde_json::from_value(forecasts.clone())?;
        report.days = forecasts.into_iter().map(from_aggregated).collect();
    } else if let Some(timeseries) = weather
        .get("properties")
        .and_then(|p| p.get("timeseries"))
    {
        let entries: Vec<TimeseriesEntry> = serde_json::from_value(timeseries.clone())?;
        let mut days = aggregate_timeseries(&entries);
        days.truncate(MAX_RAW_FORECAST_DAYS);
        report.days = days;

        if report.source.is_none() {
            report.source = Some("MET Norway".to_string());
        }
        if report.timestamp.is_none() {
            report.timestamp = weather
                .get("properties")
                .and_then(|p| p.get("meta"))
                .and_then(|m| m.get("updated_at"))
                .and_then(|t| t.as_str())
                .map(str::to_string);
        }
    }

    Ok(report)
}

fn string_field(obj: &serde_json::Map<String, serde_json::Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number_field(obj: &serde_json::Map<String, serde_json::Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(|v| v.as_f64())
}

fn from_aggregated(f: AggregatedForecast) -> DailyWeatherSummary {
    DailyWeatherSummary {
        day: f.day.unwrap_or_default(),
        date: f.date.unwrap_or_default(),
        symbol_code: f.symbol_code,
        min_temp: f.min_temp,
        max_temp: f.max_temp,
        max_wind: f.max_wind,
        total_precipitation: f.total_precipitation,
        risk_label: f.risk_level,
    }
}

// ---------------------------------------------------------------------------
// Time-series aggregation
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DayBucket {
    date: String,
    temps: Vec<f64>,
    winds: Vec<f64>,
    precipitation: f64,
    /// (distance from noon, hour, symbol) of the best symbol candidate.
    symbol: Option<(u32, u32, String)>,
}

/// Bucket entries by calendar date in first-seen order and summarise each day.
fn aggregate_timeseries(entries: &[TimeseriesEntry]) -> Vec<DailyWeatherSummary> {
    let mut buckets: Vec<DayBucket> = Vec::new();

    for entry in entries {
        let date: String = entry.time.chars().take(10).collect();
        let idx = match buckets.iter().position(|b| b.date == date) {
            Some(idx) => idx,
            None => {
                buckets.push(DayBucket {
                    date,
                    ..DayBucket::default()
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[idx];

        if let Some(instant) = &entry.data.instant {
            if let Some(t) = instant.details.air_temperature {
                bucket.temps.push(t);
            }
            if let Some(w) = instant.details.wind_speed {
                bucket.winds.push(w);
            }
        }

        let hourly = entry
            .data
            .next_1_hours
            .as_ref()
            .and_then(|p| p.details.as_ref())
            .and_then(|d| d.precipitation_amount);
        let six_hourly = entry
            .data
            .next_6_hours
            .as_ref()
            .and_then(|p| p.details.as_ref())
            .and_then(|d| d.precipitation_amount)
            .map(|amount| amount / 6.0);
        bucket.precipitation += hourly.or(six_hourly).unwrap_or(0.0);

        let symbol = entry
            .data
            .next_1_hours
            .as_ref()
            .or(entry.data.next_6_hours.as_ref())
            .and_then(|p| p.summary.as_ref())
            .map(|s| s.symbol_code.clone());
        if let (Some(symbol), Some(hour)) = (symbol, entry_hour(&entry.time)) {
            let candidate = (hour.abs_diff(12), hour, symbol);
            if bucket.symbol.as_ref().map_or(true, |best| candidate < *best) {
                bucket.symbol = Some(candidate);
            }
        }
    }

    buckets.into_iter().map(summarise_bucket).collect()
}

fn entry_hour(time: &str) -> Option<u32> {
    DateTime::parse_from_rfc3339(time)
        .ok()
        .map(|dt| dt.hour())
        .or_else(|| time.get(11..13).and_then(|h| h.parse().ok()))
}

fn summarise_bucket(bucket: DayBucket) -> DailyWeatherSummary {
    let min_temp = bucket.temps.iter().copied().reduce(f64::min);
    let max_temp = bucket.temps.iter().copied().reduce(f64::max);
    let max_wind = bucket.winds.iter().copied().reduce(f64::max);
    let total_precipitation = Some(bucket.precipitation);

    let risk = classify_day(min_temp, max_temp, max_wind, total_precipitation);

    DailyWeatherSummary {
        day: day_name(&bucket.date),
        date: bucket.date,
        symbol_code: bucket.symbol.map(|(_, _, s)| s),
        min_temp,
        max_temp,
        max_wind,
        total_precipitation,
        risk_label: Some(risk.label().to_string()),
    }
}

fn day_name(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => match d.weekday() {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
        .to_string(),
        Err(_) => date.to_string(),
    }
}

/// Derive the qualitative risk of a day from its aggregates.
///
/// High if wind > 15, precipitation > 5, min < -10 or max > 30; Medium if
/// wind > 8, precipitation > 1, min < 0 or max > 25; otherwise Low.
/// Missing values never trigger a threshold.
pub fn classify_day(
    min_temp: Option<f64>,
    max_temp: Option<f64>,
    max_wind: Option<f64>,
    precipitation: Option<f64>,
) -> RiskLevel {
    let above = |v: Option<f64>, limit: f64| v.is_some_and(|v| v > limit);
    let below = |v: Option<f64>, limit: f64| v.is_some_and(|v| v < limit);

    if above(max_wind, HIGH_WIND)
        || above(precipitation, HIGH_PRECIPITATION)
        || below(min_temp, HIGH_COLD)
        || above(max_temp, HIGH_HEAT)
    {
        RiskLevel::High
    } else if above(max_wind, MEDIUM_WIND)
        || above(precipitation, MEDIUM_PRECIPITATION)
        || below(min_temp, MEDIUM_COLD)
        || above(max_temp, MEDIUM_HEAT)
    {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// `partlycloudy_day` -> `partlycloudy day`.
pub fn humanize_symbol_code(code: &str) -> String {
    code.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(time: &str, temp: f64, wind: f64, precip_1h: Option<f64>, precip_6h: Option<f64>) -> serde_json::Value {
        let mut data = json!({
            "instant": { "details": { "air_temperature": temp, "wind_speed": wind } }
        });
        if let Some(p) = precip_1h {
            data["next_1_hours"] = json!({
                "summary": { "symbol_code": "rain" },
                "details": { "precipitation_amount": p }
            });
        }
        if let Some(p) = precip_6h {
            data["next_6_hours"] = json!({
                "summary": { "symbol_code": "cloudy" },
                "details": { "precipitation_amount": p }
            });
        }
        json!({ "time": time, "data": data })
    }

    fn raw_payload(entries: Vec<serde_json::Value>) -> String {
        json!({ "properties": { "timeseries": entries } }).to_string()
    }

    #[test]
    fn aggregated_shape_kept_in_order_with_labels() {
        let raw = json!({
            "forecasts": [
                { "day": "Tirsdag", "date": "2026-10-20", "symbolCode": "heavyrain",
                  "minTemp": 2.0, "maxTemp": 7.5, "maxWind": 9.1,
                  "totalPrecipitation": 12.0, "riskLevel": "Høy" },
                { "day": "Mandag", "date": "2026-10-19", "symbolCode": "clearsky_day",
                  "minTemp": 1.0, "maxTemp": 9.0, "maxWind": 3.0,
                  "totalPrecipitation": 0.0, "riskLevel": "Lav" }
            ],
            "timestamp": "2026-10-18T08:00:00Z",
            "source": "yr.no"
        })
        .to_string();

        let report = parse_weather(&raw).unwrap();
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].day, "Tirsdag");
        assert_eq!(report.days[1].day, "Mandag");
        assert_eq!(report.days[0].risk_label.as_deref(), Some("Høy"));
        assert_eq!(report.days[0].risk_level(), Some(RiskLevel::High));
        assert_eq!(report.source.as_deref(), Some("yr.no"));
        assert_eq!(report.timestamp.as_deref(), Some("2026-10-18T08:00:00Z"));
    }

    #[test]
    fn raw_series_groups_by_date_and_aggregates() {
        let raw = raw_payload(vec![
            entry("2026-10-19T06:00:00Z", -1.5, 4.0, Some(0.5), None),
            entry("2026-10-19T12:00:00Z", 4.0, 9.5, Some(0.25), None),
            entry("2026-10-19T18:00:00Z", 2.0, 3.0, None, Some(3.0)),
            entry("2026-10-20T12:00:00Z", 10.0, 2.0, Some(0.0), None),
        ]);

        let report = parse_weather(&raw).unwrap();
        assert_eq!(report.days.len(), 2);

        let first = &report.days[0];
        assert_eq!(first.date, "2026-10-19");
        assert_eq!(first.day, "Monday");
        assert_eq!(first.min_temp, Some(-1.5));
        assert_eq!(first.max_temp, Some(4.0));
        assert_eq!(first.max_wind, Some(9.5));
        // 0.5 + 0.25 + 3.0 / 6
        assert!((first.total_precipitation.unwrap() - 1.25).abs() < 1e-9);
        assert_eq!(first.risk_label.as_deref(), Some("Medium"));
        assert_eq!(first.symbol_code.as_deref(), Some("rain"));

        assert_eq!(report.days[1].risk_label.as_deref(), Some("Low"));
        assert_eq!(report.source.as_deref(), Some("MET Norway"));
    }

    #[test]
    fn raw_aggregation_is_order_independent_within_a_day() {
        let entries = vec![
            entry("2026-10-19T06:00:00Z", -3.0, 4.0, Some(0.5), None),
            entry("2026-10-19T09:00:00Z", 1.0, 12.0, None, Some(1.5)),
            entry("2026-10-19T12:00:00Z", 4.0, 6.0, Some(0.25), None),
            entry("2026-10-19T15:00:00Z", 2.5, 2.0, Some(0.75), None),
        ];
        let mut reversed = entries.clone();
        reversed.reverse();
        let mut rotated = entries.clone();
        rotated.rotate_left(2);

        let a = parse_weather(&raw_payload(entries)).unwrap().days;
        for other in [reversed, rotated] {
            let b = parse_weather(&raw_payload(other)).unwrap().days;
            assert_eq!(a.len(), 1);
            assert_eq!(b.len(), 1);
            assert_eq!(a[0].min_temp, b[0].min_temp);
            assert_eq!(a[0].max_temp, b[0].max_temp);
            assert_eq!(a[0].max_wind, b[0].max_wind);
            assert!(
                (a[0].total_precipitation.unwrap() - b[0].total_precipitation.unwrap()).abs()
                    < 1e-9
            );
            assert_eq!(a[0].symbol_code, b[0].symbol_code);
            assert_eq!(a[0].risk_label, b[0].risk_label);
        }
    }

    #[test]
    fn raw_series_keeps_only_first_three_days() {
        let three: Vec<_> = ["2026-10-19", "2026-10-20", "2026-10-21"]
            .iter()
            .map(|d| entry(&format!("{d}T12:00:00Z"), 5.0, 1.0, Some(0.0), None))
            .collect();
        assert_eq!(parse_weather(&raw_payload(three)).unwrap().days.len(), 3);

        // First-seen order, not chronological order.
        let five: Vec<_> = ["2026-10-23", "2026-10-19", "2026-10-21", "2026-10-20", "2026-10-22"]
            .iter()
            .map(|d| entry(&format!("{d}T12:00:00Z"), 5.0, 1.0, Some(0.0), None))
            .collect();
        let days = parse_weather(&raw_payload(five)).unwrap().days;
        let dates: Vec<_> = days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2026-10-23", "2026-10-19", "2026-10-21"]);
    }

    #[test]
    fn classify_day_thresholds() {
        assert_eq!(classify_day(Some(5.0), Some(10.0), Some(3.0), Some(0.0)), RiskLevel::Low);
        assert_eq!(classify_day(Some(5.0), Some(10.0), Some(15.1), Some(0.0)), RiskLevel::High);
        assert_eq!(classify_day(Some(5.0), Some(10.0), Some(15.0), Some(0.0)), RiskLevel::Medium);
        assert_eq!(classify_day(Some(-10.5), Some(0.0), None, None), RiskLevel::High);
        assert_eq!(classify_day(Some(-0.5), Some(3.0), None, None), RiskLevel::Medium);
        assert_eq!(classify_day(None, Some(30.5), None, None), RiskLevel::High);
        assert_eq!(classify_day(None, Some(26.0), None, None), RiskLevel::Medium);
        assert_eq!(classify_day(None, None, None, Some(5.5)), RiskLevel::High);
        assert_eq!(classify_day(None, None, None, Some(1.5)), RiskLevel::Medium);
        assert_eq!(classify_day(None, None, None, None), RiskLevel::Low);
    }

    #[test]
    fn nested_weather_and_location_metadata() {
        let raw = json!({
            "name": "Sandvika",
            "latitude": 59.89,
            "longitude": 10.52,
            "weather": { "forecasts": [], "source": "yr.no" }
        })
        .to_string();
        let report = parse_weather(&raw).unwrap();
        assert_eq!(report.location_name.as_deref(), Some("Sandvika"));
        assert_eq!(report.latitude, Some(59.89));
        assert!(report.days.is_empty());
        assert_eq!(report.source.as_deref(), Some("yr.no"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_weather("{not json"), Err(WeatherError::Json(_))));
        assert!(matches!(parse_weather("[1, 2]"), Err(WeatherError::NotAnObject)));
    }

    #[test]
    fn humanize_replaces_underscores() {
        assert_eq!(humanize_symbol_code("partlycloudy_day"), "partlycloudy day");
    }
}
