//! Record shapes on both sides of the Airtable fetch and the mapping between them.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use ts_rs::TS;

/// Substituted when a record has no (or an empty) `Date` field.
pub const NO_DATE: &str = "No Date";
/// Substituted when a record has no (or an empty) `Activity` field.
pub const NO_ACTIVITY: &str = "No Activity";

/// Body of `GET /v0/{baseId}/{tableName}`.
///
/// Only the first page is read; the `offset` cursor Airtable sends for
/// larger tables is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableListResponse {
    pub records: Vec<RawRecord>,
}

/// A single upstream record: an opaque id and its named fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub fields: RawFields,
}

/// The three fields the time log cares about. Anything else in `fields`
/// is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFields {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Activity")]
    pub activity: Option<String>,
    #[serde(rename = "Elapsed Time")]
    pub elapsed_time: Option<Number>,
}

/// Default-populated record served by `GET /api/airtable-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub date: String,
    pub activity: String,
    #[ts(type = "number")]
    pub elapsed_time: Number,
}

impl From<RawRecord> for NormalizedRecord {
    fn from(record: RawRecord) -> Self {
        normalize(record.fields)
    }
}

/// Map raw fields onto a [`NormalizedRecord`].
///
/// Empty strings and a zero elapsed time count as absent, so an explicit
/// `0` and a missing value both come out as `0`.
pub fn normalize(fields: RawFields) -> NormalizedRecord {
    NormalizedRecord {
        date: non_empty(fields.date).unwrap_or_else(|| NO_DATE.to_string()),
        activity: non_empty(fields.activity).unwrap_or_else(|| NO_ACTIVITY.to_string()),
        elapsed_time: fields
            .elapsed_time
            .filter(|n| n.as_f64().is_some_and(|v| v != 0.0))
            .unwrap_or_else(|| Number::from(0)),
    }
}

/// Normalize every record, keeping upstream order.
pub fn normalize_all(records: Vec<RawRecord>) -> Vec<NormalizedRecord> {
    records.into_iter().map(NormalizedRecord::from).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
