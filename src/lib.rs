//! # busbar-sf-changes
//!
//! Export the metadata a Salesforce user changed, as recorded by the Tooling
//! API `SourceMember` object, to a CSV file and a `package.xml` manifest.
//!
//! The pipeline is linear: query the Tooling API, write the rows to CSV, then
//! group them by metadata type into a manifest.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output and never traced
//! - User-supplied filter values are escaped as SOQL literals
//! - Manifest content is XML-escaped
//!
//! ## Crates
//!
//! - **busbar-sf-client** - HTTP client, configuration, SOQL/XML escaping
//! - **busbar-sf-auth** - Access token + instance URL from a file or the environment
//! - **busbar-sf-tooling** - Tooling API: `SourceMember` queries
//! - **busbar-sf-metadata** - `package.xml` generation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_sf_changes::{ChangeSession, OutputPaths, RunOutcome, SalesforceCredentials, ToolingClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), busbar_sf_changes::Error> {
//!     let creds = SalesforceCredentials::from_file("auth.json")?;
//!     let client = ToolingClient::from_credentials(&creds)?;
//!
//!     let mut session = ChangeSession::new(client, "Jane Doe");
//!     let types = session.discover_types().await?.to_vec();
//!
//!     let session = session.with_member_types(types);
//!     match session.run(&OutputPaths::default()).await? {
//!         RunOutcome::Completed { rows, .. } => println!("{rows} rows exported"),
//!         RunOutcome::NoRecords => println!("No records found."),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod error;
mod export;
mod pipeline;

pub use error::{Error, ErrorKind, Result};
pub use export::{read_records, write_records, WriteOutcome};
pub use pipeline::{
    build_manifest, regenerate_manifest, write_manifest, ChangeSession, OutputPaths, RunOutcome,
    DEFAULT_CSV_PATH, DEFAULT_PACKAGE_XML_PATH,
};

// Re-export all crates for convenient access
pub use busbar_sf_auth as auth;
pub use busbar_sf_client as client;
pub use busbar_sf_metadata as metadata;
pub use busbar_sf_tooling as tooling;

// Re-export commonly used types at the top level
pub use busbar_sf_auth::{Credentials, SalesforceCredentials};
pub use busbar_sf_client::{ClientConfig, DEFAULT_API_VERSION};
pub use busbar_sf_metadata::PackageManifest;
pub use busbar_sf_tooling::{MetadataRecord, SourceMemberQuery, ToolingClient};
