//! SOQL construction for `SourceMember` change queries.

use busbar_sf_client::security::soql;

use crate::error::{Error, ErrorKind, Result};

/// Fields selected from `SourceMember`, in output order.
pub const SOURCE_MEMBER_FIELDS: &[&str] = &[
    "Id",
    "LastModifiedBy.Name",
    "MemberIdOrName",
    "MemberType",
    "MemberName",
    "RevisionNum",
    "RevisionCounter",
    "IsNameObsolete",
    "LastModifiedById",
    "IsNewMember",
    "ChangedBy",
];

/// Filter for the components a user last modified.
///
/// `member_types` keeps the order it was given in; duplicates are allowed and
/// passed through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMemberQuery {
    changed_by: String,
    member_types: Vec<String>,
}

impl SourceMemberQuery {
    /// Filter on `LastModifiedBy.Name = changed_by`.
    pub fn new(changed_by: impl Into<String>) -> Self {
        Self {
            changed_by: changed_by.into(),
            member_types: Vec::new(),
        }
    }

    /// Restrict the query to these metadata types.
    pub fn with_member_types<I, S>(mut self, member_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_types = member_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn changed_by(&self) -> &str {
        &self.changed_by
    }

    pub fn member_types(&self) -> &[String] {
        &self.member_types
    }

    /// Render the SOQL for this filter.
    pub fn to_soql(&self) -> Result<String> {
        build_query(&self.changed_by, &self.member_types)
    }
}

/// Build the `SourceMember` query for a user and optional metadata types.
///
/// String values are escaped as SOQL literals. Blank type names are skipped;
/// if nothing remains, no `MemberType IN` clause is added.
///
/// # Errors
///
/// [`ErrorKind::Configuration`] when `changed_by` is empty or whitespace.
///
/// # Example
///
/// ```rust
/// use busbar_sf_tooling::build_query;
///
/// let soql = build_query("Jane Doe", &["ApexClass", "CustomObject"]).unwrap();
/// assert!(soql.ends_with(
///     "WHERE LastModifiedBy.Name = 'Jane Doe' AND MemberType IN ('ApexClass', 'CustomObject')"
/// ));
/// ```
pub fn build_query<S: AsRef<str>>(changed_by: &str, member_types: &[S]) -> Result<String> {
    if changed_by.trim().is_empty() {
        return Err(Error::new(ErrorKind::Configuration(
            "the user who made the changes (LastModifiedBy.Name) is required".to_string(),
        )));
    }

    let mut query = format!(
        "SELECT {} FROM SourceMember WHERE LastModifiedBy.Name = {}",
        SOURCE_MEMBER_FIELDS.join(", "),
        soql::literal(changed_by)
    );

    let types: Vec<String> = member_types
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(soql::literal)
        .collect();

    if !types.is_empty() {
        query.push_str(&format!(" AND MemberType IN ({})", types.join(", ")));
    }

    Ok(query)
}

/// Split a comma-separated list of metadata types, trimming entries and
/// dropping blanks.
pub fn parse_member_types(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "SELECT Id, LastModifiedBy.Name, MemberIdOrName, MemberType, MemberName, \
        RevisionNum, RevisionCounter, IsNameObsolete, LastModifiedById, IsNewMember, ChangedBy \
        FROM SourceMember WHERE LastModifiedBy.Name = 'Jane Doe'";

    #[test]
    fn test_query_without_member_types() {
        let query = build_query::<&str>("Jane Doe", &[]).unwrap();
        assert_eq!(query, BASE);
        assert!(!query.contains(" IN "));
    }

    #[test]
    fn test_query_with_member_types_in_order() {
        let query = build_query("Jane Doe", &["CustomObject", "ApexClass", "Flow"]).unwrap();

        assert_eq!(
            query,
            format!("{BASE} AND MemberType IN ('CustomObject', 'ApexClass', 'Flow')")
        );
        assert_eq!(query.matches("AND MemberType IN (").count(), 1);
    }

    #[test]
    fn test_duplicate_member_types_are_kept() {
        let query = build_query("Jane Doe", &["ApexClass", "ApexClass"]).unwrap();
        assert!(query.ends_with("IN ('ApexClass', 'ApexClass')"));
    }

    #[test]
    fn test_blank_member_types_are_ignored() {
        let query = build_query("Jane Doe", &["", "  "]).unwrap();
        assert_eq!(query, BASE);
    }

    #[test]
    fn test_empty_changed_by_is_configuration_error() {
        let err = build_query::<&str>("", &[]).unwrap_err();
        assert!(err.is_configuration());

        let err = build_query("   ", &["ApexClass"]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Configuration(_)));
    }

    #[test]
    fn test_values_are_escaped() {
        let query = build_query("O'Brien", &["Apex' OR MemberType != '"]).unwrap();

        assert!(query.contains("LastModifiedBy.Name = 'O\\'Brien'"));
        assert!(query.ends_with("IN ('Apex\\' OR MemberType != \\'')"));
    }

    #[test]
    fn test_source_member_query() {
        let query = SourceMemberQuery::new("Jane Doe").with_member_types(vec!["ApexTrigger"]);

        assert_eq!(query.changed_by(), "Jane Doe");
        assert_eq!(query.member_types(), ["ApexTrigger".to_string()]);
        assert_eq!(
            query.to_soql().unwrap(),
            format!("{BASE} AND MemberType IN ('ApexTrigger')")
        );
    }

    #[test]
    fn test_parse_member_types() {
        assert_eq!(
            parse_member_types(" ApexClass, ,CustomObject ,"),
            vec!["ApexClass".to_string(), "CustomObject".to_string()]
        );
        assert!(parse_member_types("").is_empty());
    }
}
