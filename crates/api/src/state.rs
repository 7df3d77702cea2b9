use std::sync::Arc;

use hmsnova_core::source::SjaRecordSource;
use hmsnova_report::SjaReportGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hmsnova_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Where SJA record graphs are loaded from when a request does not carry one.
    pub records: Arc<dyn SjaRecordSource>,
    /// PDF generator, configured once from `config`.
    pub reports: Arc<SjaReportGenerator>,
}

impl AppState {
    /// State backed by Postgres for record loading.
    pub fn new(pool: hmsnova_db::DbPool, config: ServerConfig) -> Self {
        let records = Arc::new(hmsnova_db::source::PgSjaSource::new(pool.clone()));
        Self::with_source(pool, config, records)
    }

    /// State with an explicit record source.
    pub fn with_source(
        pool: hmsnova_db::DbPool,
        config: ServerConfig,
        records: Arc<dyn SjaRecordSource>,
    ) -> Self {
        let reports = Arc::new(SjaReportGenerator::new(
            config.icon_dir.clone(),
            config.wrap_mode,
        ));
        Self {
            pool,
            config: Arc::new(config),
            records,
            reports,
        }
    }
}
