//! Loads served records over HTTP and projects them into a [`ChartModel`].

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::model::{ChartModel, ChartPoint};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/airtable-data";

#[derive(Debug, Clone, Error)]
pub enum ChartError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("http {status}: {body}")]
    Status { status: u16, body: String },
    #[error("json error: {0}")]
    Parse(String),
    #[error("render error: {0}")]
    Render(String),
}

#[derive(Debug, Clone)]
pub struct ChartLoader {
    http: Client,
    endpoint: Url,
}

impl ChartLoader {
    pub fn new(endpoint: Url) -> Result<Self, ChartError> {
        let http = Client::builder()
            .user_agent(concat!("airtable-chart/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChartError::Transport(e.to_string()))?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One GET against the record endpoint.
    pub async fn fetch_points(&self) -> Result<Vec<ChartPoint>, ChartError> {
        let res = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| ChartError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ChartError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ChartError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ChartError::Parse(e.to_string()))
    }

    /// Fetch and project. Any failure leaves the empty initial model.
    pub async fn load_and_project(&self) -> ChartModel {
        match self.fetch_points().await {
            Ok(points) => ChartModel::from_points(&points),
            Err(e) => {
                debug!(endpoint = %self.endpoint, error = %e, "Chart data unavailable");
                ChartModel::default()
            }
        }
    }
}
