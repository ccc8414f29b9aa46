//! Error types produced while turning a request body into a PDF report.

use thiserror::Error;

/// The request body could not be decoded into a report payload.
#[derive(Debug, Error)]
#[error("Invalid JSON input: {0}")]
pub struct DecodeError(#[from] pub serde_json::Error);

/// Failures raised by the PDF renderer.
///
/// Every variant keeps the underlying `genpdf` error so callers can log the full chain, while the
/// response encoder collapses all of them into an opaque server fault.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No usable font family could be located or loaded.
    #[error("font family unavailable")]
    FontUnavailable(#[source] genpdf::error::Error),
    /// An element could not be laid out on the page.
    #[error("failed to lay out report")]
    Layout(#[source] genpdf::error::Error),
    /// The assembled document could not be written out as PDF bytes.
    #[error("failed to serialize report")]
    Serialization(#[source] genpdf::error::Error),
}

/// Any failure of the request pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ReportError {
    /// HTTP status code reported to the caller for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            ReportError::Decode(_) => 400,
            ReportError::Render(_) => 500,
        }
    }
}
