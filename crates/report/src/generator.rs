//! Report orchestration.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};

use hmsnova_core::sja::SjaRecord;
use hmsnova_core::text::WrapMode;

use crate::canvas::DocumentInfo;
use crate::cursor::PageGeometry;
use crate::error::ReportResult;
use crate::icons::IconLoader;
use crate::sections::{attachments, footer, header, products, risks, weather};
use crate::writer::ReportWriter;

const PRODUCER: &str = "HMS Nova";

/// Per-request report settings.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Date printed in the footer and written as the creation date.
    pub generated_on: NaiveDate,
}

impl ReportOptions {
    pub fn for_date(generated_on: NaiveDate) -> Self {
        Self { generated_on }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::for_date(Utc::now().date_naive())
    }
}

/// Builds SJA PDF documents. Holds only configuration, so one instance is
/// shared across requests.
#[derive(Debug, Clone)]
pub struct SjaReportGenerator {
    icons: IconLoader,
    wrap: WrapMode,
    geometry: PageGeometry,
}

impl SjaReportGenerator {
    pub fn new(icon_dir: impl Into<PathBuf>, wrap: WrapMode) -> Self {
        Self {
            icons: IconLoader::new(icon_dir),
            wrap,
            geometry: PageGeometry::A4,
        }
    }

    /// Render `record` to PDF bytes.
    ///
    /// Sections are drawn in order: header, weather, risks, general
    /// mitigations, products, attachments. Footers are stamped once the page
    /// count is final.
    pub async fn generate(&self, record: &SjaRecord, options: &ReportOptions) -> ReportResult<Vec<u8>> {
        tracing::debug!(
            sja_id = record.id,
            risks = record.risks.len(),
            products = record.products.len(),
            "Generating SJA report"
        );

        let mut writer = ReportWriter::new(self.geometry, self.wrap);

        header::render_header(&mut writer, record);
        weather::render_weather(&mut writer, record.location.as_deref());
        risks::render_risks(&mut writer, &record.risks);
        risks::render_general_actions(&mut writer, &record.general_actions);
        products::render_products(&mut writer, &record.products, &self.icons).await;
        attachments::render_attachments(&mut writer, &record.attachments);

        let mut canvas = writer.into_canvas();
        footer::render_footer(&mut canvas, &self.geometry, &record.title, options.generated_on);
        let pages = canvas.page_count();

        let info = DocumentInfo {
            title: format!("SJA - {}", record.title),
            producer: PRODUCER.to_string(),
            creation_date: Some(options.generated_on.format("D:%Y%m%d000000Z").to_string()),
        };
        let bytes = canvas.finish(&info)?;

        tracing::info!(sja_id = record.id, pages, bytes = bytes.len(), "SJA report generated");
        Ok(bytes)
    }
}
