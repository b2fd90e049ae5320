//! # sf-auth
//!
//! Credential loading for Salesforce API clients.
//!
//! Obtaining a token is out of scope: credentials come from an existing auth
//! file (for example the JSON written by `sf org display --json` and trimmed
//! to `access_token` / `instance_url`) or from environment variables.
//!
//! ## Security
//!
//! - Access tokens are redacted in Debug output
//! - Error messages never include the token value
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_sf_auth::{Credentials, SalesforceCredentials};
//!
//! let creds = SalesforceCredentials::from_file("auth.json")?;
//! println!("Connected to {}", creds.instance_url());
//!
//! // Or from SF_INSTANCE_URL / SF_ACCESS_TOKEN
//! let creds = SalesforceCredentials::from_env()?;
//! ```

mod credentials;
mod error;

pub use credentials::{Credentials, SalesforceCredentials};
pub use error::{Error, ErrorKind, Result};
