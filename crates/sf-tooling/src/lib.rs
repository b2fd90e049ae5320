//! # sf-tooling
//!
//! Salesforce Tooling API client for tracking metadata changes.
//!
//! ## Features
//!
//! - **SourceMember Query** - Build the SOQL that lists the components a user
//!   last modified, optionally narrowed to a set of metadata types
//! - **Record Passthrough** - Query results keep every field in the order the
//!   API returned it
//! - **Type Discovery** - List the distinct metadata types a user touched
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_tooling::{SourceMemberQuery, ToolingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_sf_tooling::Error> {
//!     let client = ToolingClient::new(
//!         "https://myorg.my.salesforce.com",
//!         "access_token_here",
//!     )?
//!     .with_api_version("60.0");
//!
//!     let query = SourceMemberQuery::new("Jane Doe")
//!         .with_member_types(["ApexClass", "CustomObject"]);
//!
//!     for record in client.source_members(&query).await? {
//!         println!("{} {}", record.member_type(), record.member_name());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod source_member;
mod types;

pub use client::ToolingClient;
pub use error::{Error, ErrorKind, Result};
pub use source_member::{build_query, parse_member_types, SourceMemberQuery, SOURCE_MEMBER_FIELDS};
pub use types::MetadataRecord;

// Re-export busbar-sf-client types that users might need
pub use busbar_sf_client::{ClientConfig, ClientConfigBuilder, QueryResult};
