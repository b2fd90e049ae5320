//! # sf-client
//!
//! Core HTTP client infrastructure for Salesforce APIs.
//!
//! This crate provides the foundational HTTP client used by the Tooling API
//! layer:
//! - Bearer authentication on every request
//! - Compression support (gzip, deflate)
//! - API usage reporting from `Sforce-Limit-Info`
//! - Request/response tracing
//!
//! Requests are sent exactly once. A status other than `200 OK` is returned
//! as [`ErrorKind::Http`] with the response body kept verbatim so that callers
//! can show exactly what Salesforce said.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (sf-tooling, busbar-sf-changes pipeline)                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds instance URL, token and API version                │
//! │  - Builds Tooling API URLs                                  │
//! │  - Typed JSON GET and Tooling query                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - Raw single-attempt HTTP over reqwest                     │
//! │  - Header / query parameter assembly                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_client::{QueryResult, SalesforceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_sf_client::Error> {
//!     let client = SalesforceClient::new("https://myorg.my.salesforce.com", "token")?
//!         .with_api_version("60.0");
//!
//!     let result: QueryResult<serde_json::Value> = client
//!         .tooling_query("SELECT Id, MemberName FROM SourceMember LIMIT 5")
//!         .await?;
//!
//!     println!("{} records", result.total_size);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;
pub mod security;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, CompressionConfig};
pub use error::{Error, ErrorKind, Result};
pub use request::RequestBuilder;
pub use response::{ApiUsage, Response};
pub use salesforce_client::{QueryResult, SalesforceClient};

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "60.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("busbar-sf-changes/", env!("CARGO_PKG_VERSION"));
