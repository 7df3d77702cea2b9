//! HMS Nova domain library.
//!
//! Pure, database-free building blocks for the SJA (Safe Job Analysis)
//! report: the hydrated record graph, risk scoring, weather normalization,
//! pictogram lookup tables, and text wrapping. The `db`, `report` and `api`
//! crates all build on these types.

pub mod error;
pub mod risk;
pub mod sja;
pub mod source;
pub mod symbols;
pub mod text;
pub mod types;
pub mod weather;
