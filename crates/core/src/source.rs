//! Record source abstraction used by the report endpoint.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::sja::SjaRecord;
use crate::types::DbId;

/// Loads a fully hydrated [`SjaRecord`] (risks with their actions, general
/// actions, products with symbol sets, attachments, author) by id.
///
/// Returns `Ok(None)` when no such record exists. Tenant checks are the
/// caller's job; implementations return records for any company.
#[async_trait]
pub trait SjaRecordSource: Send + Sync {
    async fn load(&self, id: DbId) -> Result<Option<SjaRecord>, CoreError>;
}
