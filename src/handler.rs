//! The request pipeline: body text in, gateway response out.

use chrono::{Local, NaiveDate};

use crate::error::ReportError;
use crate::model::ReportDocument;
use crate::payload;
use crate::render;
use crate::response::ReportResponse;

/// Decodes `body`, renders the report and returns the PDF bytes.
///
/// `today` is the date printed into the footer disclaimer of reports that carry metadata.
pub fn generate_report(body: &str, today: NaiveDate) -> Result<Vec<u8>, ReportError> {
    let payload = payload::decode(body)?;
    let report = ReportDocument::from_payload(&payload, today);
    log::info!(
        "rendering report '{}' ({}, {} record(s))",
        report.title(),
        report.locale(),
        payload.records().len()
    );
    let bytes = render::render_report(&report)?;
    log::info!("rendered {} byte(s)", bytes.len());
    Ok(bytes)
}

/// Handles one invocation with an explicit generation date.
pub fn handle_request_on(body: &str, today: NaiveDate) -> ReportResponse {
    match generate_report(body, today) {
        Ok(bytes) => ReportResponse::pdf(&bytes),
        Err(err) => {
            match &err {
                ReportError::Decode(decode) => log::warn!("rejecting request: {}", decode),
                ReportError::Render(render) => {
                    log::error!("report generation failed: {:?}", render)
                }
            }
            ReportResponse::from_error(&err)
        }
    }
}

/// Handles one invocation, dating the report with the local calendar date.
pub fn handle_request(body: &str) -> ReportResponse {
    handle_request_on(body, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_body_is_a_client_error() {
        let response = handle_request("this is not json");
        assert_eq!(response.status_code, 400);
        assert!(response.body.contains("Invalid JSON input"));
    }

    #[test]
    fn wrong_field_type_is_a_client_error() {
        let response = handle_request(r#"[{"date":"2024-01-01","tour":"three"}]"#);
        assert_eq!(response.status_code, 400);
    }
}
