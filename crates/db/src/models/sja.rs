//! SJA row models and their conversion into the report graph.

use chrono::NaiveDate;
use hmsnova_core::sja::{Attachment, ChemicalProductRef, MitigationAction, RiskItem};
use hmsnova_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from `sjas`, joined with the author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sja {
    pub id: DbId,
    pub company_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub work_site: Option<String>,
    pub scheduled_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub created_by: Option<DbId>,
    /// `users.name` of `created_by`, if any.
    pub author_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `sja_risks`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SjaRisk {
    pub id: DbId,
    pub sja_id: DbId,
    pub position: i32,
    pub activity: String,
    pub hazard: String,
    pub consequence: Option<String>,
    pub probability: Option<i32>,
    pub severity: Option<i32>,
    pub score: Option<i32>,
}

/// A row from `sja_actions`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SjaAction {
    pub id: DbId,
    pub sja_id: DbId,
    pub risk_id: Option<DbId>,
    pub position: i32,
    pub description: String,
    pub responsible: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
}

/// A chemical joined through `sja_products`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SjaProduct {
    pub chemical_id: DbId,
    pub position: i32,
    pub product_name: String,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
    pub hazard_symbols: Vec<String>,
    pub ppe_symbols: Vec<String>,
    pub hazard_class: Option<String>,
    pub un_number: Option<String>,
}

/// A row from `sja_attachments`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SjaAttachment {
    pub id: DbId,
    pub sja_id: DbId,
    pub name: Option<String>,
    pub url: String,
}

impl SjaRisk {
    pub fn into_domain(self, actions: Vec<MitigationAction>) -> RiskItem {
        RiskItem {
            id: Some(self.id),
            activity: self.activity,
            hazard: self.hazard,
            consequence: self.consequence,
            probability: self.probability,
            severity: self.severity,
            stored_score: self.score,
            actions,
        }
    }
}

impl From<SjaAction> for MitigationAction {
    fn from(row: SjaAction) -> Self {
        Self {
            description: row.description,
            responsible: row.responsible,
            status: row.status,
            due_date: row.due_date,
            risk_id: row.risk_id,
        }
    }
}

impl From<SjaProduct> for ChemicalProductRef {
    fn from(row: SjaProduct) -> Self {
        Self {
            product_name: row.product_name,
            manufacturer: row.manufacturer,
            description: row.description,
            hazard_symbols: row.hazard_symbols,
            ppe_symbols: row.ppe_symbols,
            hazard_class: row.hazard_class,
            un_number: row.un_number,
        }
    }
}

impl From<SjaAttachment> for Attachment {
    fn from(row: SjaAttachment) -> Self {
        Self {
            name: row.name,
            url: row.url,
        }
    }
}
