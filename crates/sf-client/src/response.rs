//! HTTP response handling with Salesforce-specific extensions.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around HTTP response with additional functionality.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the status is exactly `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status() == 200
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }

    /// Fail with [`ErrorKind::Http`] unless the status is `200 OK`.
    ///
    /// The body of a failed response is read and kept as-is. If it cannot be
    /// read, the body is empty and the read failure becomes the error source.
    pub async fn error_for_status(self) -> Result<Self> {
        if self.is_ok() {
            return Ok(self);
        }

        let status = self.status();
        match self.text().await {
            Ok(body) => Err(Error::new(ErrorKind::Http { status, body })),
            Err(read_err) => {
                warn!(status, error = %read_err, "Failed to read error response body");
                Err(Error::with_source(
                    ErrorKind::Http {
                        status,
                        body: String::new(),
                    },
                    read_err,
                ))
            }
        }
    }

    /// Get API usage limits from response headers.
    pub fn api_usage(&self) -> Option<ApiUsage> {
        ApiUsage::parse(self.header("sforce-limit-info")?)
    }
}

/// API usage information from response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiUsage {
    /// Number of API calls used.
    pub used: u64,
    /// Total API call limit.
    pub limit: u64,
}

impl ApiUsage {
    /// Parse a `Sforce-Limit-Info` header value, e.g. `api-usage=25/15000`.
    pub fn parse(info: &str) -> Option<Self> {
        for part in info.split(',') {
            if let Some(usage) = part.trim().strip_prefix("api-usage=") {
                let (used, limit) = usage.split_once('/')?;
                return Some(Self {
                    used: used.trim().parse().ok()?,
                    limit: limit.trim().parse().ok()?,
                });
            }
        }

        None
    }

    /// Get the remaining API calls.
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }
}
