//! HTTP request building with Salesforce-specific headers.

use std::collections::HashMap;

/// Builder for authenticated GET requests.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) bearer_token: Option<String>,
}

impl RequestBuilder {
    /// Create a new GET request builder.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            bearer_token: None,
        }
    }

    /// The target URL, without query parameters added through [`query`](Self::query).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter. The value is URL-encoded when the request is sent.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Ask for a JSON response.
    pub fn accept_json(self) -> Self {
        self.header("Accept", "application/json")
    }

    /// The URL with query parameters percent-encoded and appended.
    pub(crate) fn full_url(&self) -> String {
        if self.query_params.is_empty() {
            return self.url.clone();
        }
        let query: Vec<String> = self
            .query_params
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect();
        format!("{}?{}", self.url, query.join("&"))
    }
}
