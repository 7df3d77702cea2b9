//! Repository for the `sjas` table and its report relations.

use sqlx::PgPool;
use hmsnova_core::types::DbId;

use crate::models::sja::{Sja, SjaAction, SjaAttachment, SjaProduct, SjaRisk};

/// Read-only queries backing the SJA report.
pub struct SjaRepo;

impl SjaRepo {
    /// Find an SJA by id, joined with its author's name.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sja>, sqlx::Error> {
        sqlx::query_as::<_, Sja>(
            "SELECT s.id, s.company_id, s.title, s.description, s.status, s.work_site,
                    s.scheduled_date, s.location, s.created_by, u.name AS author_name,
                    s.created_at, s.updated_at
             FROM sjas s
             LEFT JOIN users u ON u.id = s.created_by
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List the risks of an SJA in stored order.
    pub async fn list_risks(pool: &PgPool, sja_id: DbId) -> Result<Vec<SjaRisk>, sqlx::Error> {
        sqlx::query_as::<_, SjaRisk>(
            "SELECT id, sja_id, position, activity, hazard, consequence,
                    probability, severity, score
             FROM sja_risks
             WHERE sja_id = $1
             ORDER BY position ASC, id ASC",
        )
        .bind(sja_id)
        .fetch_all(pool)
        .await
    }

    /// List every action of an SJA, both risk-bound and general, in stored order.
    pub async fn list_actions(pool: &PgPool, sja_id: DbId) -> Result<Vec<SjaAction>, sqlx::Error> {
        sqlx::query_as::<_, SjaAction>(
            "SELECT id, sja_id, risk_id, position, description, responsible, status, due_date
             FROM sja_actions
             WHERE sja_id = $1
             ORDER BY position ASC, id ASC",
        )
        .bind(sja_id)
        .fetch_all(pool)
        .await
    }

    /// List the chemical products referenced by an SJA, with their symbol sets.
    pub async fn list_products(
        pool: &PgPool,
        sja_id: DbId,
    ) -> Result<Vec<SjaProduct>, sqlx::Error> {
        sqlx::query_as::<_, SjaProduct>(
            "SELECT c.id AS chemical_id, sp.position, c.product_name, c.manufacturer,
                    c.description, c.hazard_symbols, c.ppe_symbols, c.hazard_class,
                    c.un_number
             FROM sja_products sp
             JOIN chemicals c ON c.id = sp.chemical_id
             WHERE sp.sja_id = $1
             ORDER BY sp.position ASC, c.id ASC",
        )
        .bind(sja_id)
        .fetch_all(pool)
        .await
    }

    /// List attachments of an SJA, oldest first.
    pub async fn list_attachments(
        pool: &PgPool,
        sja_id: DbId,
    ) -> Result<Vec<SjaAttachment>, sqlx::Error> {
        sqlx::query_as::<_, SjaAttachment>(
            "SELECT id, sja_id, name, url
             FROM sja_attachments
             WHERE sja_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(sja_id)
        .fetch_all(pool)
        .await
    }
}
