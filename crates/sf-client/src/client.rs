//! Core HTTP client with compression and Salesforce-specific handling.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::Response;

/// HTTP client for Salesforce APIs.
///
/// Every request is sent once. Status handling is left to the caller through
/// [`Response::error_for_status`].
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let compressed = config.compression.accept_compressed;
        builder = builder.gzip(compressed).deflate(compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::get(url)
    }

    /// Send a request once and return the raw response, whatever its status.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut req = self.inner.get(request.full_url());

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if self.config.enable_tracing {
            debug!(url = %request.url, "Sending request");
        }

        let response = Response::new(req.send().await?);

        if self.config.enable_tracing {
            let status = response.status();
            if response.is_ok() {
                debug!(status, "Response received");
            } else {
                info!(status, "Non-success response");
            }
            if let Some(usage) = response.api_usage() {
                debug!(used = usage.used, limit = usage.limit, "API usage");
            }
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> SfHttpClient {
        SfHttpClient::new(ClientConfig::builder().with_tracing(false).build()).unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = SfHttpClient::default_client().unwrap();
        assert!(client.config().compression.accept_compressed);
    }

    #[tokio::test]
    async fn test_successful_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true
            })))
            .mount(&mock_server)
            .await;

        let client = client();
        let response = client
            .execute(
                client
                    .get(format!("{}/test", mock_server.uri()))
                    .bearer_auth("test-token"),
            )
            .await
            .unwrap();

        assert!(response.is_ok());
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_query_params_are_encoded() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/query"))
            .and(query_param("q", "SELECT Id FROM SourceMember WHERE Name = 'a b'"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client();
        let response = client
            .execute(
                client
                    .get(format!("{}/query", mock_server.uri()))
                    .query("q", "SELECT Id FROM SourceMember WHERE Name = 'a b'"),
            )
            .await
            .unwrap();

        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_non_success_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/unavailable"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client();
        let result = client
            .execute(client.get(format!("{}/unavailable", mock_server.uri())))
            .await
            .unwrap()
            .error_for_status()
            .await;

        let err = result.unwrap_err();
        match err.kind {
            ErrorKind::Http { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_truncated_error_body_keeps_read_failure() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            // Declares 100 bytes, sends 7, then hangs up.
            socket
                .write_all(b"HTTP/1.1 401 Unauthorized\r\ncontent-length: 100\r\n\r\ninvalid")
                .await
                .unwrap();
        });

        let client = client();
        let response = client
            .execute(client.get(format!("http://{addr}/query")))
            .await
            .unwrap();
        assert_eq!(response.status(), 401);

        let err = response.error_for_status().await.unwrap_err();
        match err.kind {
            ErrorKind::Http { status, ref body } => {
                assert_eq!(status, 401);
                assert!(body.is_empty());
            }
            ref other => panic!("unexpected error kind: {other:?}"),
        }
        assert!(err.source.is_some());
    }
}
