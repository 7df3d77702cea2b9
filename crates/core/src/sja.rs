//! The hydrated SJA record graph consumed by the report generator.
//!
//! These types are read-only inputs: they arrive either pre-hydrated in a
//! report request body (camelCase JSON, as sent by the web client) or are
//! assembled by the database layer. Nothing in the report path mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::risk::{risk_score, RiskLevel};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Record graph
// ---------------------------------------------------------------------------

/// A Safe Job Analysis with all relations needed for the PDF report.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SjaRecord {
    pub id: DbId,
    pub company_id: DbId,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub work_site: Option<String>,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    /// Display name of the author.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Raw JSON location/weather snapshot. Accepts either a JSON string or an
    /// inline object in request bodies; always stored as the JSON text.
    #[serde(default, deserialize_with = "string_or_json")]
    pub location: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub risks: Vec<RiskItem>,
    /// Mitigations not tied to a specific risk.
    #[serde(default)]
    pub general_actions: Vec<MitigationAction>,
    #[serde(default)]
    pub products: Vec<ChemicalProductRef>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// One hazard identified for an activity.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    #[serde(default)]
    pub id: Option<DbId>,
    pub activity: String,
    pub hazard: String,
    #[serde(default)]
    pub consequence: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub probability: Option<i32>,
    #[serde(default)]
    #[validate(range(min = 1, max = 5))]
    pub severity: Option<i32>,
    #[serde(default, alias = "score", alias = "riskValue")]
    #[validate(range(min = 1, max = 25))]
    pub stored_score: Option<i32>,
    #[serde(default)]
    pub actions: Vec<MitigationAction>,
}

impl RiskItem {
    /// Stored score, or `probability × severity` with missing factors as 1.
    pub fn score(&self) -> i32 {
        risk_score(self.probability, self.severity, self.stored_score)
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score())
    }
}

/// A mitigation (tiltak), owned by at most one risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationAction {
    pub description: String,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub risk_id: Option<DbId>,
}

/// A chemical product referenced by the SJA (from the stoffkartotek).
///
/// Symbols are kept as raw codes so that unknown values survive parsing and
/// can be skipped at render time instead of rejecting the whole record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalProductRef {
    #[serde(alias = "name")]
    pub product_name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hazard_symbols: Vec<String>,
    #[serde(default)]
    pub ppe_symbols: Vec<String>,
    #[serde(default)]
    pub hazard_class: Option<String>,
    #[serde(default)]
    pub un_number: Option<String>,
}

/// An already-resolved attachment reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default)]
    pub name: Option<String>,
    pub url: String,
}

fn default_status() -> String {
    "DRAFT".to_string()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

impl SjaRecord {
    /// Validate a record that arrived pre-hydrated from a client.
    pub fn validate_for_report(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("title must not be blank".into()));
        }
        Ok(())
    }

    /// Attachment file name: `SJA-{title}.pdf` with spaces replaced by `_`.
    ///
    /// Quotes, backslashes and control characters are dropped so the name
    /// can be embedded in a quoted `Content-Disposition` parameter.
    pub fn report_filename(&self) -> String {
        let title: String = self
            .title
            .trim()
            .chars()
            .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
            .map(|c| if c == ' ' { '_' } else { c })
            .collect();
        format!("SJA-{title}.pdf")
    }
}

/// Accept either a JSON string or any other JSON value, keeping the text.
fn string_or_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Dates arrive either as `YYYY-MM-DD` or as full RFC 3339 timestamps.
pub mod flexible_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{s}'"))),
        }
    }
}
