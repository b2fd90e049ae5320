//! High-level Salesforce client with typed HTTP methods.
//!
//! This module provides `SalesforceClient`, which combines an instance URL and
//! access token with an HTTP client and provides typed JSON methods.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Sensitive parameters are skipped in tracing spans

use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::DEFAULT_API_VERSION;

/// High-level Salesforce API client.
///
/// The access token is redacted in Debug output to prevent accidental
/// exposure in logs.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_sf_client::SalesforceClient;
///
/// let client = SalesforceClient::new("https://na1.salesforce.com", "token")?
///     .with_api_version("60.0");
///
/// let url = client.tooling_url("sobjects");
/// let sobjects: serde_json::Value = client.get_json(client.get(&url)).await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(instance_url, access_token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let instance_url = instance_url.into().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&instance_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            ))));
        }

        let http = SfHttpClient::new(config)?;
        Ok(Self {
            http,
            instance_url,
            access_token: access_token.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    /// Set the API version (e.g., "60.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Build the Tooling API URL for a path.
    ///
    /// Example: `tooling_url("query")` -> `/services/data/v60.0/tooling/query`
    pub fn tooling_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!(
            "{}/services/data/v{}/tooling/{}",
            self.instance_url, self.api_version, path
        )
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.access_token)
    }

    /// GET request with JSON response deserialization.
    ///
    /// Any status other than `200 OK` fails with [`ErrorKind::Http`].
    #[instrument(skip(self, request), fields(url = %request.url()))]
    pub async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.http.execute(request.accept_json()).await?;
        response.error_for_status().await?.json().await
    }

    /// Execute a SOQL query via the Tooling API.
    ///
    /// Only the first batch is fetched; `nextRecordsUrl` is not followed.
    #[instrument(skip(self))]
    pub async fn tooling_query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let request = self.get(&self.tooling_url("query")).query("q", soql);
        let result: QueryResult<T> = self.get_json(request).await?;

        if let Some(ref next) = result.next_records_url {
            warn!(
                total_size = result.total_size,
                next_records_url = %next,
                "Query returned more records than one batch; remaining batches are not fetched"
            );
        }

        Ok(result)
    }
}

/// Result of a SOQL query.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct QueryResult<T> {
    /// Total number of records matching the query.
    #[serde(rename = "totalSize", default)]
    pub total_size: u64,

    /// Whether all records are returned (no more pages).
    #[serde(default = "default_done")]
    pub done: bool,

    /// URL to fetch next batch of results.
    #[serde(rename = "nextRecordsUrl")]
    pub next_records_url: Option<String>,

    /// The records.
    pub records: Vec<T>,
}

fn default_done() -> bool {
    true
}
