/// Errors that abort report generation.
///
/// Problems confined to optional blocks (bad weather JSON, a missing icon)
/// are handled where they occur and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
