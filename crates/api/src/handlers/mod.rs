pub mod sja_report;
