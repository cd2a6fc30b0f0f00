use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, http::StatusCode};
use serde_json::Number;
use services::services::{
    airtable::{AirtableError, RecordSource},
    records::NormalizedRecord,
};
use tower::ServiceExt;

/// Record source that always returns the same canned result.
pub struct FakeSource(pub Result<Vec<NormalizedRecord>, AirtableError>);

#[async_trait]
impl RecordSource for FakeSource {
    async fn fetch_records(&self) -> Result<Vec<NormalizedRecord>, AirtableError> {
        self.0.clone()
    }
}

pub fn record(date: &str, activity: &str, elapsed: u64) -> NormalizedRecord {
    NormalizedRecord {
        date: date.to_string(),
        activity: activity.to_string(),
        elapsed_time: Number::from(elapsed),
    }
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
