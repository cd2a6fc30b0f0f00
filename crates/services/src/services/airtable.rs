//! Airtable API client for the time-log table.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use strum_macros::Display;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

use super::{
    config::{AirtableConfig, ConfigError},
    records::{AirtableListResponse, NormalizedRecord, normalize_all},
};

/// Coarse classification of [`AirtableError`], used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FetchErrorKind {
    Remote,
    Transport,
    Parse,
    Config,
}

#[derive(Debug, Clone, Error)]
pub enum AirtableError {
    #[error("Error: {status_text} ({status}), Details: {body}")]
    Remote {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("network error: {0}")]
    Transport(String),
    #[error("json error: {0}")]
    Parse(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AirtableError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Remote { .. } => FetchErrorKind::Remote,
            Self::Transport(_) => FetchErrorKind::Transport,
            Self::Parse(_) => FetchErrorKind::Parse,
            Self::Config(_) => FetchErrorKind::Config,
        }
    }
}

/// Anything that can produce the normalized record set.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<NormalizedRecord>, AirtableError>;
}

/// Airtable API client
#[derive(Debug)]
pub struct AirtableClient {
    http: Client,
    config: AirtableConfig,
    records_url: Url,
}

impl AirtableClient {
    /// Build the HTTP client and resolve the table url once.
    pub fn new(config: AirtableConfig) -> Result<Self, AirtableError> {
        let records_url = config.records_url()?;

        let mut builder =
            Client::builder().user_agent(concat!("airtable-chart/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AirtableError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            config,
            records_url,
        })
    }

    pub fn records_url(&self) -> &Url {
        &self.records_url
    }

    /// Fetch the first page of records and normalize them.
    ///
    /// Every failure is logged here, once, with its full detail.
    pub async fn fetch_records(&self) -> Result<Vec<NormalizedRecord>, AirtableError> {
        match self.send_request().await {
            Ok(response) => {
                let records = normalize_all(response.records);
                debug!(
                    count = records.len(),
                    base_id = %self.config.base_id(),
                    table = %self.config.table_name(),
                    "Fetched Airtable records"
                );
                Ok(records)
            }
            Err(e) => {
                error!(
                    kind = %e.kind(),
                    error = %e,
                    url = %self.records_url,
                    "Airtable fetch failed"
                );
                Err(e)
            }
        }
    }

    async fn send_request(&self) -> Result<AirtableListResponse, AirtableError> {
        let res = self
            .http
            .get(self.records_url.clone())
            .bearer_auth(self.config.api_key().expose_secret())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error body: {}", e));
            return Err(AirtableError::Remote {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        let body = res.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&body).map_err(|e| AirtableError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RecordSource for AirtableClient {
    async fn fetch_records(&self) -> Result<Vec<NormalizedRecord>, AirtableError> {
        AirtableClient::fetch_records(self).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> AirtableError {
    if e.is_timeout() {
        AirtableError::Transport(format!("request timed out: {}", e))
    } else {
        AirtableError::Transport(e.to_string())
    }
}
