//! Postgres-backed [`SjaRecordSource`].

use async_trait::async_trait;
use hmsnova_core::error::CoreError;
use hmsnova_core::sja::{MitigationAction, SjaRecord};
use hmsnova_core::source::SjaRecordSource;
use hmsnova_core::types::DbId;

use crate::models::sja::{Sja, SjaAction, SjaAttachment, SjaProduct, SjaRisk};
use crate::repositories::SjaRepo;
use crate::DbPool;

/// Hydrates SJA report graphs from PostgreSQL.
#[derive(Clone)]
pub struct PgSjaSource {
    pool: DbPool,
}

impl PgSjaSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load_graph(&self, id: DbId) -> Result<Option<SjaRecord>, sqlx::Error> {
        let Some(sja) = SjaRepo::find_by_id(&self.pool, id).await? else {
            return Ok(None);
        };

        let risks = SjaRepo::list_risks(&self.pool, id).await?;
        let actions = SjaRepo::list_actions(&self.pool, id).await?;
        let products = SjaRepo::list_products(&self.pool, id).await?;
        let attachments = SjaRepo::list_attachments(&self.pool, id).await?;

        tracing::debug!(
            sja_id = id,
            risks = risks.len(),
            actions = actions.len(),
            products = products.len(),
            attachments = attachments.len(),
            "Loaded SJA report graph"
        );

        Ok(Some(assemble_graph(sja, risks, actions, products, attachments)))
    }
}

#[async_trait]
impl SjaRecordSource for PgSjaSource {
    async fn load(&self, id: DbId) -> Result<Option<SjaRecord>, CoreError> {
        self.load_graph(id).await.map_err(|e| {
            tracing::error!(sja_id = id, error = %e, "Failed to load SJA");
            CoreError::Internal(format!("failed to load SJA {id}: {e}"))
        })
    }
}

/// Build the domain graph from rows.
///
/// Actions whose `risk_id` matches one of the SJA's risks are nested under
/// that risk; all others (no owner, or an owner outside this SJA) become
/// general actions. Input ordering is preserved in both lists.
pub fn assemble_graph(
    sja: Sja,
    risks: Vec<SjaRisk>,
    actions: Vec<SjaAction>,
    products: Vec<SjaProduct>,
    attachments: Vec<SjaAttachment>,
) -> SjaRecord {
    let mut general_actions = Vec::new();
    let mut by_risk: Vec<(DbId, Vec<MitigationAction>)> =
        risks.iter().map(|r| (r.id, Vec::new())).collect();

    for action in actions {
        let owner = action
            .risk_id
            .and_then(|rid| by_risk.iter_mut().find(|(id, _)| *id == rid));
        match owner {
            Some((_, list)) => list.push(action.into()),
            None => general_actions.push(action.into()),
        }
    }

    let risks = risks
        .into_iter()
        .zip(by_risk)
        .map(|(risk, (_, actions))| risk.into_domain(actions))
        .collect();

    SjaRecord {
        id: sja.id,
        company_id: sja.company_id,
        title: sja.title,
        description: sja.description,
        status: sja.status,
        work_site: sja.work_site,
        scheduled_date: sja.scheduled_date,
        created_at: Some(sja.created_at),
        created_by: sja.author_name,
        location: sja.location,
        risks,
        general_actions,
        products: products.into_iter().map(Into::into).collect(),
        attachments: attachments.into_iter().map(Into::into).collect(),
    }
}
