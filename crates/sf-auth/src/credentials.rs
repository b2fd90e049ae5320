//! Credentials trait and implementations.
//!
//! All credential types implement custom Debug to redact sensitive data.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};

/// Trait for Salesforce credentials.
pub trait Credentials: Send + Sync {
    /// Get the Salesforce instance URL.
    fn instance_url(&self) -> &str;

    /// Get the access token.
    fn access_token(&self) -> &str;

    /// Get the API version (e.g., "60.0").
    fn api_version(&self) -> &str;

    /// Returns true if the credentials appear to be valid (non-empty).
    fn is_valid(&self) -> bool {
        !self.instance_url().is_empty() && !self.access_token().is_empty()
    }
}

/// Standard Salesforce credentials implementation.
///
/// The access token is redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone)]
pub struct SalesforceCredentials {
    instance_url: String,
    access_token: String,
    api_version: String,
}

impl std::fmt::Debug for SalesforceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("instance_url", &self.instance_url)
            .field("access_token", &"[REDACTED]")
            .field("api_version", &self.api_version)
            .finish()
    }
}

/// Shape of an auth file. Extra keys are ignored.
#[derive(Deserialize)]
struct AuthFile {
    access_token: Option<String>,
    instance_url: Option<String>,
}

impl SalesforceCredentials {
    /// Create new credentials with the given values.
    pub fn new(
        instance_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            instance_url: instance_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            api_version: api_version.into(),
        }
    }

    /// Load credentials from a JSON auth file with `access_token` and
    /// `instance_url` keys.
    ///
    /// The API version defaults to [`busbar_sf_client::DEFAULT_API_VERSION`];
    /// override it with [`with_api_version`](Self::with_api_version).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading credentials from file");

        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse credentials from the contents of a JSON auth file.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: AuthFile = serde_json::from_str(json)?;

        let access_token = required(file.access_token, "access_token")?;
        let instance_url = required(file.instance_url, "instance_url")?;

        Self::validated(
            instance_url,
            access_token,
            busbar_sf_client::DEFAULT_API_VERSION.to_string(),
        )
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `SF_INSTANCE_URL` or `SALESFORCE_INSTANCE_URL`
    /// - `SF_ACCESS_TOKEN` or `SALESFORCE_ACCESS_TOKEN`
    ///
    /// Optional:
    /// - `SF_API_VERSION` or `SALESFORCE_API_VERSION` (default: "60.0")
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let either = |primary: &str, fallback: &str| lookup(primary).or_else(|| lookup(fallback));

        let instance_url = either("SF_INSTANCE_URL", "SALESFORCE_INSTANCE_URL")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_INSTANCE_URL".to_string())))?;

        let access_token = either("SF_ACCESS_TOKEN", "SALESFORCE_ACCESS_TOKEN")
            .ok_or_else(|| Error::new(ErrorKind::EnvVar("SF_ACCESS_TOKEN".to_string())))?;

        let api_version = either("SF_API_VERSION", "SALESFORCE_API_VERSION")
            .unwrap_or_else(|| busbar_sf_client::DEFAULT_API_VERSION.to_string());

        Self::validated(instance_url, access_token, api_version)
    }

    fn validated(instance_url: String, access_token: String, api_version: String) -> Result<Self> {
        if access_token.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidCredentials(
                "access_token is empty".to_string(),
            )));
        }

        let parsed = url::Url::parse(instance_url.trim()).map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidCredentials(format!("instance_url is not a valid URL: {e}")),
                e,
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::InvalidCredentials(format!(
                "instance_url must use http or https, got '{}'",
                parsed.scheme()
            ))));
        }

        Ok(Self::new(instance_url.trim(), access_token, api_version))
    }

    /// Change the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }
}

fn required(value: Option<String>, key: &str) -> Result<String> {
    value.ok_or_else(|| {
        Error::new(ErrorKind::InvalidCredentials(format!(
            "missing required key '{key}'"
        )))
    })
}

impl Credentials for SalesforceCredentials {
    fn instance_url(&self) -> &str {
        &self.instance_url
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn api_version(&self) -> &str {
        &self.api_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_credentials_new() {
        let creds = SalesforceCredentials::new("https://na1.salesforce.com/", "token", "60.0");

        assert_eq!(creds.instance_url(), "https://na1.salesforce.com");
        assert_eq!(creds.access_token(), "token");
        assert_eq!(creds.api_version(), "60.0");
        assert!(creds.is_valid());
    }

    #[test]
    fn test_invalid_credentials() {
        let creds = SalesforceCredentials::new("", "", "60.0");
        assert!(!creds.is_valid());
    }

    #[test]
    fn test_credentials_debug_redacts_tokens() {
        let creds = SalesforceCredentials::new(
            "https://na1.salesforce.com",
            "00D000000000001!AQ0AQsecret",
            "60.0",
        );

        let debug_output = format!("{:?}", creds);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("AQ0AQsecret"));
        assert!(debug_output.contains("na1.salesforce.com"));
    }

    #[test]
    fn test_from_json() {
        let creds = SalesforceCredentials::from_json(
            r#"{
                "access_token": "00Dxx!token",
                "instance_url": "https://acme.my.salesforce.com",
                "id": "https://login.salesforce.com/id/00Dxx/005xx",
                "token_type": "Bearer"
            }"#,
        )
        .unwrap();

        assert_eq!(creds.instance_url(), "https://acme.my.salesforce.com");
        assert_eq!(creds.access_token(), "00Dxx!token");
        assert_eq!(creds.api_version(), busbar_sf_client::DEFAULT_API_VERSION);
    }

    #[test]
    fn test_from_json_missing_access_token() {
        let err = SalesforceCredentials::from_json(
            r#"{"instance_url": "https://acme.my.salesforce.com"}"#,
        )
        .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
        assert!(err.to_string().contains("access_token"));
    }

    #[test]
    fn test_from_json_missing_instance_url() {
        let err = SalesforceCredentials::from_json(r#"{"access_token": "tok"}"#).unwrap_err();
        assert!(err.to_string().contains("instance_url"));
    }

    #[test]
    fn test_from_json_rejects_bad_url() {
        let err = SalesforceCredentials::from_json(
            r#"{"access_token": "tok", "instance_url": "acme.my.salesforce.com"}"#,
        )
        .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidCredentials(_)));
        assert!(!err.to_string().contains("tok\""));
    }

    #[test]
    fn test_from_json_malformed() {
        let err = SalesforceCredentials::from_json("{not json").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"access_token": "abc", "instance_url": "https://acme.my.salesforce.com/"}}"#
        )
        .unwrap();

        let creds = SalesforceCredentials::from_file(file.path())
            .unwrap()
            .with_api_version("59.0");

        assert_eq!(creds.instance_url(), "https://acme.my.salesforce.com");
        assert_eq!(creds.api_version(), "59.0");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = SalesforceCredentials::from_file(dir.path().join("auth.json")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }

    #[test]
    fn test_from_lookup_prefers_sf_prefix() {
        let vars: HashMap<&str, &str> = [
            ("SF_INSTANCE_URL", "https://primary.my.salesforce.com"),
            ("SALESFORCE_INSTANCE_URL", "https://fallback.my.salesforce.com"),
            ("SALESFORCE_ACCESS_TOKEN", "token"),
        ]
        .into_iter()
        .collect();

        let creds =
            SalesforceCredentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(creds.instance_url(), "https://primary.my.salesforce.com");
        assert_eq!(creds.access_token(), "token");
        assert_eq!(creds.api_version(), busbar_sf_client::DEFAULT_API_VERSION);
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let err = SalesforceCredentials::from_lookup(|k| {
            (k == "SF_INSTANCE_URL").then(|| "https://na1.salesforce.com".to_string())
        })
        .unwrap_err();

        assert!(matches!(err.kind, ErrorKind::EnvVar(ref v) if v == "SF_ACCESS_TOKEN"));
    }
}
