//! SJA PDF report endpoint.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde::Deserialize;

use hmsnova_core::error::CoreError;
use hmsnova_core::sja::{Attachment, SjaRecord};
use hmsnova_core::types::DbId;
use hmsnova_report::ReportOptions;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Optional body of a report request.
///
/// An empty body is treated as `{}`: the record is loaded by id and no extra
/// attachments are listed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// A pre-hydrated record. Loaded from the database when absent.
    #[serde(default)]
    pub record: Option<SjaRecord>,
    /// Already-resolved attachment URLs to list in the report.
    #[serde(default)]
    pub attachment_urls: Vec<String>,
}

impl ReportRequest {
    fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))
    }
}

/// POST /api/v1/sja/{id}/pdf
///
/// Renders the SJA as a PDF attachment. The record must belong to the
/// session's company.
pub async fn generate_pdf(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let request = ReportRequest::from_body(&body)?;

    let mut record = match request.record {
        Some(record) => {
            if record.id != id {
                return Err(AppError::BadRequest(format!(
                    "Record id {} does not match path id {id}",
                    record.id
                )));
            }
            record.validate_for_report()?;
            record
        }
        None => state
            .records
            .load(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Sja", id })?,
    };

    user.ensure_company(record.company_id)?;

    record
        .attachments
        .extend(request.attachment_urls.into_iter().map(|url| Attachment { name: None, url }));

    let pdf = state
        .reports
        .generate(&record, &ReportOptions::default())
        .await?;

    tracing::info!(
        sja_id = id,
        user_id = user.user_id,
        bytes = pdf.len(),
        "Served SJA report"
    );

    let disposition = HeaderValue::from_str(&content_disposition(&record.report_filename()))
        .map_err(|e| AppError::InternalError(format!("Invalid Content-Disposition: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    ))
}

/// `attachment; filename="..."`, plus an RFC 5987 `filename*` when the name
/// is not plain ASCII.
fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{filename}\"");
    }
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    let encoded: String = filename
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() || b"-._~".contains(&b) {
                (b as char).to_string()
            } else {
                format!("%{b:02X}")
            }
        })
        .collect();
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
