//! Section renderers, in document order.

pub mod attachments;
pub mod footer;
pub mod header;
pub mod products;
pub mod risks;
pub mod weather;

use chrono::NaiveDate;

/// Norwegian date display used throughout the report.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
