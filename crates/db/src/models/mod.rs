//! Row models.
//!
//! Each submodule contains `FromRow` structs matching the database rows and
//! conversions into the `hmsnova_core` domain graph.

pub mod sja;
