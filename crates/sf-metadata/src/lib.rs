//! # busbar-sf-metadata
//!
//! Salesforce Metadata API manifests.
//!
//! ## Features
//!
//! - **Package Manifest** - Group components by metadata type and render a
//!   `package.xml` suitable for retrieve or deploy
//! - **Safe Rendering** - Type and member names are XML-escaped
//!
//! ## Example
//!
//! ```rust
//! use busbar_sf_metadata::PackageManifest;
//!
//! let manifest = PackageManifest::new("60.0")
//!     .add_type("ApexClass", ["Foo", "Bar"])
//!     .add_type("CustomObject", ["Account__c"]);
//!
//! let xml = manifest.to_package_xml();
//! assert!(xml.contains("<name>CustomObject</name>"));
//! ```

mod manifest;

pub use manifest::{PackageManifest, METADATA_NAMESPACE};
