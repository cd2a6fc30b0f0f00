//! Connection settings for the Airtable table the time log lives in.

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;
use utils::env::{self, EnvError};

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_ID_VAR: &str = "AIRTABLE_BASE_ID";
pub const TABLE_NAME_VAR: &str = "AIRTABLE_TABLE_NAME";
pub const API_KEY_VAR: &str = "AIRTABLE_API_KEY";
pub const API_URL_VAR: &str = "AIRTABLE_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "AIRTABLE_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("invalid Airtable API url {url:?}: {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Built once at startup and handed to [`AirtableClient::new`].
///
/// [`AirtableClient::new`]: super::airtable::AirtableClient::new
#[derive(Debug)]
pub struct AirtableConfig {
    base_id: String,
    table_name: String,
    api_key: SecretString,
    api_url: String,
    request_timeout: Option<Duration>,
}

impl AirtableConfig {
    pub fn new(
        base_id: impl Into<String>,
        table_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_id: base_id.into(),
            table_name: table_name.into(),
            api_key: SecretString::from(api_key.into()),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }

    /// Read `AIRTABLE_BASE_ID`, `AIRTABLE_TABLE_NAME` and `AIRTABLE_API_KEY`,
    /// plus the optional `AIRTABLE_API_URL` and `AIRTABLE_REQUEST_TIMEOUT_SECS`.
    /// A timeout of `0` disables the limit.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            env::required(BASE_ID_VAR)?,
            env::required(TABLE_NAME_VAR)?,
            env::required(API_KEY_VAR)?,
        );

        if let Some(api_url) = env::optional(API_URL_VAR) {
            config = config.with_api_url(api_url);
        }
        if let Some(secs) = env::parsed::<u64>(REQUEST_TIMEOUT_VAR)? {
            config = config.with_request_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }

        config.records_url()?;
        Ok(config)
    }

    /// Point the client somewhere other than the public API.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub(crate) fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// `{api_url}/{base_id}/{table_name}`, with both identifiers
    /// percent-encoded as single path segments.
    pub fn records_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            url: self.api_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(&self.base_id)
            .push(&self.table_name);

        Ok(url)
    }
}
