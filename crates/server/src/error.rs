use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::services::airtable::AirtableError;
use thiserror::Error;

/// The only failure message callers ever see.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data from Airtable";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Airtable(#[from] AirtableError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Detail was logged where the failure was detected; every kind
        // collapses to the same response here.
        let (status, error) = match &self {
            ApiError::Airtable(e) => {
                tracing::debug!(kind = %e.kind(), "Responding with generic fetch failure");
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}
