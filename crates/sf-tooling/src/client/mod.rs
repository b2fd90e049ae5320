//! Salesforce Tooling API client.
//!
//! This client wraps `SalesforceClient` from `sf-client` and provides
//! typed methods for Tooling API operations.

use busbar_sf_auth::Credentials;
use busbar_sf_client::{ClientConfig, SalesforceClient};

use crate::error::Result;

mod query;
mod source_member;

/// Salesforce Tooling API client.
///
/// Provides typed methods for Tooling API operations:
/// - Raw SOQL queries against tooling objects
/// - `SourceMember` change listing for a user
/// - Discovery of the metadata types a user changed
///
/// Each call is a single request: no retries and no pagination.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_sf_tooling::{SourceMemberQuery, ToolingClient};
///
/// let client = ToolingClient::new(
///     "https://myorg.my.salesforce.com",
///     "access_token_here",
/// )?;
///
/// let types = client.member_types_changed_by("Jane Doe").await?;
/// let records = client
///     .source_members(&SourceMemberQuery::new("Jane Doe").with_member_types(types))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ToolingClient {
    client: SalesforceClient,
}

impl ToolingClient {
    /// Create a new Tooling API client with the given instance URL and access token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        let client = SalesforceClient::new(instance_url, access_token)?;
        Ok(Self { client })
    }

    /// Create a new Tooling API client with custom HTTP configuration.
    pub fn with_config(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(instance_url, access_token, config)?;
        Ok(Self { client })
    }

    /// Create a client for the org, token and API version held by `creds`.
    pub fn from_credentials(creds: &dyn Credentials) -> Result<Self> {
        Self::from_credentials_with_config(creds, ClientConfig::default())
    }

    /// Like [`from_credentials`](Self::from_credentials) with custom HTTP configuration.
    pub fn from_credentials_with_config(
        creds: &dyn Credentials,
        config: ClientConfig,
    ) -> Result<Self> {
        Ok(
            Self::with_config(creds.instance_url(), creds.access_token(), config)?
                .with_api_version(creds.api_version()),
        )
    }

    /// Get the instance URL.
    pub fn instance_url(&self) -> &str {
        self.client.instance_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busbar_sf_auth::SalesforceCredentials;

    #[test]
    fn test_client_creation() {
        let client = ToolingClient::new("https://na1.salesforce.com", "token123").unwrap();

        assert_eq!(client.instance_url(), "https://na1.salesforce.com");
        assert_eq!(client.api_version(), "60.0");
    }

    #[test]
    fn test_api_version_override() {
        let client = ToolingClient::new("https://na1.salesforce.com", "token")
            .unwrap()
            .with_api_version("58.0");

        assert_eq!(client.api_version(), "58.0");
    }

    #[test]
    fn test_from_credentials_uses_api_version() {
        let creds = SalesforceCredentials::new("https://acme.my.salesforce.com/", "tok", "59.0");
        let client = ToolingClient::from_credentials(&creds).unwrap();

        assert_eq!(client.instance_url(), "https://acme.my.salesforce.com");
        assert_eq!(client.api_version(), "59.0");
    }
}
