//! Decoding of incoming report requests.
//!
//! Two body shapes are accepted and normalized into a single [`RequestPayload`]:
//!
//! - a bare array of records, each carrying its own `language` field;
//! - an object with a `records` array and a `meta` object holding `language`, `month` and `year`.
//!
//! Domain values are not validated. Dates that do not parse, negative revenue or an occupied
//! distance larger than the total distance all pass through untouched.

use serde::Deserialize;

use crate::error::DecodeError;

/// One day of taxi activity.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DailyReport {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    pub total_distance: f64,
    pub occupied_distance: f64,
    pub tour: i64,
    pub revenue: f64,
    /// Per-record language tag used by the flat array body.
    pub language: Option<String>,
}

/// Metadata describing the whole batch of records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportMetadata {
    pub language: String,
    pub month: String,
    pub year: String,
}

/// A decoded request: the ordered records plus the batch metadata, if the body carried any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestPayload {
    records: Vec<DailyReport>,
    meta: Option<ReportMetadata>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RequestBody {
    Flat(Vec<DailyReport>),
    WithMeta {
        records: Vec<DailyReport>,
        #[serde(default)]
        meta: Option<ReportMetadata>,
    },
}

impl RequestPayload {
    /// Creates a payload from already decoded parts.
    pub fn new(records: Vec<DailyReport>, meta: Option<ReportMetadata>) -> Self {
        Self { records, meta }
    }

    /// Returns the records in request order.
    pub fn records(&self) -> &[DailyReport] {
        &self.records
    }

    /// Returns the batch metadata sent with the extended body shape.
    pub fn meta(&self) -> Option<&ReportMetadata> {
        self.meta.as_ref()
    }

    /// Whether the payload contains at least one record.
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    /// Language tag requested for the report.
    ///
    /// The metadata wins when present; otherwise the first record's own tag is used. An empty
    /// string means no language was requested at all.
    pub fn language(&self) -> &str {
        match &self.meta {
            Some(meta) => meta.language.as_str(),
            None => self
                .records
                .first()
                .and_then(|record| record.language.as_deref())
                .unwrap_or_default(),
        }
    }
}

/// Parses a raw request body into a [`RequestPayload`].
pub fn decode(body: &str) -> Result<RequestPayload, DecodeError> {
    let payload = match serde_json::from_str::<RequestBody>(body)? {
        RequestBody::Flat(records) => RequestPayload::new(records, None),
        RequestBody::WithMeta { records, meta } => RequestPayload::new(records, meta),
    };
    log::debug!(
        "decoded {} record(s), metadata present: {}",
        payload.records.len(),
        payload.meta.is_some()
    );
    Ok(payload)
}
