//! Package manifest (package.xml) generation.

use busbar_sf_client::security::xml;
use indexmap::{IndexMap, IndexSet};

/// Namespace of the `<Package>` root element.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// Package manifest (package.xml).
///
/// Members are grouped by metadata type. Types keep the order in which they
/// were first added, and so do members within a type; adding a member twice
/// has no effect. All values are XML-escaped when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageManifest {
    version: String,
    types: IndexMap<String, IndexSet<String>>,
}

impl PackageManifest {
    /// Create a new package manifest with the given API version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            types: IndexMap::new(),
        }
    }

    /// Build a manifest from `(type, member)` pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use busbar_sf_metadata::PackageManifest;
    ///
    /// let manifest = PackageManifest::from_members(
    ///     "60.0",
    ///     [("ApexClass", "Foo"), ("ApexClass", "Bar"), ("ApexClass", "Foo")],
    /// );
    /// let members: Vec<&str> = manifest.members("ApexClass").unwrap().collect();
    /// assert_eq!(members, ["Foo", "Bar"]);
    /// ```
    pub fn from_members<I, T, M>(version: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = (T, M)>,
        T: Into<String>,
        M: Into<String>,
    {
        let mut manifest = Self::new(version);
        for (member_type, member) in members {
            manifest.add_member(member_type, member);
        }
        manifest
    }

    /// Add one member under a metadata type.
    pub fn add_member(&mut self, member_type: impl Into<String>, member: impl Into<String>) {
        self.types
            .entry(member_type.into())
            .or_default()
            .insert(member.into());
    }

    /// Add a metadata type with its members.
    pub fn add_type<I, M>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let entry = self.types.entry(name.into()).or_default();
        entry.extend(members.into_iter().map(Into::into));
        self
    }

    /// The API version written to `<version>`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Each metadata type with its member set, in first-occurrence order.
    pub fn types(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.types
            .iter()
            .map(|(name, members)| (name.as_str(), members))
    }

    /// Metadata types in first-occurrence order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Members of one type, in first-occurrence order.
    pub fn members(&self, member_type: &str) -> Option<impl Iterator<Item = &str>> {
        self.types
            .get(member_type)
            .map(|members| members.iter().map(String::as_str))
    }

    /// Number of distinct metadata types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Render the complete `package.xml` document.
    pub fn to_package_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!("<Package xmlns=\"{METADATA_NAMESPACE}\">\n"));
        out.push_str(&format!(
            "  <version>{}</version>\n",
            xml::escape(&self.version)
        ));

        for (name, members) in self.types() {
            out.push_str("  <types>\n");
            for member in members {
                out.push_str(&format!("    <members>{}</members>\n", xml::escape(member)));
            }
            out.push_str(&format!("    <name>{}</name>\n", xml::escape(name)));
            out.push_str("  </types>\n");
        }

        out.push_str("</Package>\n");
        out
    }
}
