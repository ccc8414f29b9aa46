//! HTTP-style responses in the shape cloud-function gateways expect.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;

use crate::error::ReportError;

/// File name suggested to clients downloading the report.
pub const REPORT_FILENAME: &str = "taxi_report.pdf";

/// A gateway proxy response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl ReportResponse {
    /// A `200` response carrying the base64-encoded PDF as an attachment.
    pub fn pdf(bytes: &[u8]) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_owned(), "application/pdf".to_owned());
        headers.insert(
            "Content-Disposition".to_owned(),
            format!("attachment; filename={}", REPORT_FILENAME),
        );
        Self {
            status_code: 200,
            headers,
            body: STANDARD.encode(bytes),
            is_base64_encoded: true,
        }
    }

    /// A `400` response with a plain-text explanation.
    pub fn bad_request(message: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_owned(), "text/plain".to_owned());
        Self {
            status_code: 400,
            headers,
            body: message.into(),
            is_base64_encoded: false,
        }
    }

    /// A `500` response without a body.
    pub fn server_error() -> Self {
        Self {
            status_code: 500,
            headers: BTreeMap::new(),
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    /// Maps a pipeline failure onto the response reported to the caller.
    ///
    /// Only client-input errors carry details; renderer failures stay opaque.
    pub fn from_error(err: &ReportError) -> Self {
        match err {
            ReportError::Decode(decode) => Self::bad_request(decode.to_string()),
            ReportError::Render(_) => Self::server_error(),
        }
    }
}
