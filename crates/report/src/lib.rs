//! SJA PDF report generator.
//!
//! Serializes a hydrated [`SjaRecord`](hmsnova_core::sja::SjaRecord) into a
//! paginated PDF held entirely in memory:
//!
//! ```text
//! header -> weather -> risks -> general mitigations -> products
//!        -> attachments -> footer pass -> bytes
//! ```
//!
//! Layout state lives in an explicit [`cursor::LayoutCursor`] threaded through
//! every section renderer via [`writer::ReportWriter`]. Failures in optional
//! blocks (weather parsing, icon files) are recovered locally; only PDF
//! assembly errors abort generation.

pub mod canvas;
pub mod cursor;
pub mod error;
pub mod generator;
pub mod icons;
pub mod layout;
pub mod metrics;
pub mod sections;
pub mod writer;

pub use error::{ReportError, ReportResult};
pub use generator::{ReportOptions, SjaReportGenerator};
