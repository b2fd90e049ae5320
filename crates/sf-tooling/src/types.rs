//! Types for Salesforce Tooling API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One `SourceMember` row as returned by the Tooling API.
///
/// All fields are kept, in the order the API returned them, so a record can
/// be written out as-is. `MemberType` and `MemberName` drive manifest
/// generation; everything else (`Id`, `RevisionNum`, `attributes`, ...) is
/// passthrough.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MetadataRecord(Map<String, Value>);

impl MetadataRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append or replace a field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Look up a field by API name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The `MemberType` value, or `""` when absent or not a string.
    pub fn member_type(&self) -> &str {
        self.str_field("MemberType")
    }

    /// The `MemberName` value, or `""` when absent or not a string.
    pub fn member_name(&self) -> &str {
        self.str_field("MemberName")
    }

    fn str_field(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or_default()
    }

    /// Field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for MetadataRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_field_order() {
        let record: MetadataRecord = serde_json::from_str(
            r#"{
                "attributes": {"type": "SourceMember", "url": "/services/data/v60.0/tooling/sobjects/SourceMember/0MZxx"},
                "Id": "0MZxx",
                "MemberType": "ApexClass",
                "MemberName": "Foo",
                "RevisionCounter": 12,
                "IsNameObsolete": false
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = record.field_names().collect();
        assert_eq!(
            names,
            ["attributes", "Id", "MemberType", "MemberName", "RevisionCounter", "IsNameObsolete"]
        );
        assert_eq!(record.member_type(), "ApexClass");
        assert_eq!(record.member_name(), "Foo");
        assert_eq!(record.get("RevisionCounter"), Some(&Value::from(12)));
    }

    #[test]
    fn test_missing_member_fields_read_as_empty() {
        let record = MetadataRecord::new().with("Id", "0MZxx").with("MemberName", Value::Null);
        assert_eq!(record.member_type(), "");
        assert_eq!(record.member_name(), "");
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_from_iter() {
        let record: MetadataRecord = [("MemberType", "Flow"), ("MemberName", "Onboarding")]
            .into_iter()
            .collect();
        assert_eq!(record.member_type(), "Flow");
        assert!(!record.is_empty());
    }
}
