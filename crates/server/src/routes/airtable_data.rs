//! Route serving the normalized time-log records.

use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use services::services::records::NormalizedRecord;

use crate::{AppState, error::ApiError};

/// GET /api/airtable-data
/// Fetch the table and return its records, defaults filled in
pub async fn get_airtable_data(
    State(state): State<AppState>,
) -> Result<ResponseJson<Vec<NormalizedRecord>>, ApiError> {
    let records = state.records().fetch_records().await?;
    Ok(ResponseJson(records))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/airtable-data", get(get_airtable_data))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;
    use services::services::{
        airtable::{AirtableClient, AirtableError},
        config::{AirtableConfig, ConfigError},
        records::NormalizedRecord,
    };
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    use crate::{
        AppState, routes,
        test_support::{FakeSource, get_json, record},
    };

    fn app_with(result: Result<Vec<NormalizedRecord>, AirtableError>) -> axum::Router {
        routes::router(AppState::new(Arc::new(FakeSource(result))))
    }

    #[tokio::test]
    async fn test_returns_records_in_order() {
        let app = app_with(Ok(vec![
            record("2024-01-02", "Swim", 45),
            record("2024-01-01", "Run", 30),
        ]));

        let (status, body) = get_json(app, "/api/airtable-data").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                { "date": "2024-01-02", "activity": "Swim", "elapsedTime": 45 },
                { "date": "2024-01-01", "activity": "Run", "elapsedTime": 30 }
            ])
        );
    }

    #[tokio::test]
    async fn test_every_error_kind_collapses_to_generic_500() {
        let errors = vec![
            AirtableError::Remote {
                status: 401,
                status_text: "Unauthorized".to_string(),
                body: "{\"error\":\"AUTHENTICATION_REQUIRED\"}".to_string(),
            },
            AirtableError::Transport("dns error".to_string()),
            AirtableError::Parse("expected value at line 1".to_string()),
            AirtableError::Config(ConfigError::InvalidApiUrl {
                url: "::".to_string(),
                reason: "relative URL without a base".to_string(),
            }),
        ];

        for error in errors {
            let (status, body) = get_json(app_with(Err(error)), "/api/airtable-data").await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": "Failed to fetch data from Airtable" }));
        }
    }

    async fn app_for_upstream(server: &MockServer) -> axum::Router {
        let config = AirtableConfig::new("appTest", "tblTime", "patTest").with_api_url(server.uri());
        let client = AirtableClient::new(config).unwrap();
        routes::router(AppState::new(Arc::new(client)))
    }

    #[tokio::test]
    async fn test_end_to_end_single_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/appTest/tblTime"))
            .and(header("Authorization", "Bearer patTest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [
                    { "id": "r1", "fields": { "Date": "2024-01-01", "Activity": "Run", "Elapsed Time": 30 } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (status, body) = get_json(app_for_upstream(&server).await, "/api/airtable-data").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "date": "2024-01-01", "activity": "Run", "elapsedTime": 30 }])
        );
    }

    #[tokio::test]
    async fn test_end_to_end_empty_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{ "id": "r2", "fields": {} }]
            })))
            .mount(&server)
            .await;

        let (status, body) = get_json(app_for_upstream(&server).await, "/api/airtable-data").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "date": "No Date", "activity": "No Activity", "elapsedTime": 0 }])
        );
    }

    #[tokio::test]
    async fn test_end_to_end_upstream_status_is_hidden() {
        for upstream in [401u16, 404, 500] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(upstream).set_body_string("NOT_FOUND details"))
                .mount(&server)
                .await;

            let (status, body) =
                get_json(app_for_upstream(&server).await, "/api/airtable-data").await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": "Failed to fetch data from Airtable" }));
        }
    }

    #[tokio::test]
    async fn test_end_to_end_network_failure() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = AirtableConfig::new("appTest", "tblTime", "patTest")
            .with_api_url(format!("http://127.0.0.1:{port}"));
        let app = routes::router(AppState::new(Arc::new(AirtableClient::new(config).unwrap())));

        let (status, body) = get_json(app, "/api/airtable-data").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch data from Airtable" }));
    }
}
