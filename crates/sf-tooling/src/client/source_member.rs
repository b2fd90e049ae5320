use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::source_member::SourceMemberQuery;
use crate::types::MetadataRecord;

impl super::ToolingClient {
    /// List the `SourceMember` rows matching `query`.
    ///
    /// Fails with [`ErrorKind::Configuration`](crate::ErrorKind::Configuration)
    /// before any request is sent when the user name is blank.
    #[instrument(skip(self), fields(changed_by = %query.changed_by()))]
    pub async fn source_members(&self, query: &SourceMemberQuery) -> Result<Vec<MetadataRecord>> {
        let soql = query.to_soql()?;
        let records = self.query_records(&soql).await?;
        debug!(count = records.len(), "SourceMember rows fetched");
        Ok(records)
    }

    /// Distinct metadata types `changed_by` last modified, in the order they
    /// first appear in the query result.
    #[instrument(skip(self))]
    pub async fn member_types_changed_by(&self, changed_by: &str) -> Result<Vec<String>> {
        let records = self
            .source_members(&SourceMemberQuery::new(changed_by))
            .await?;
        Ok(distinct_member_types(&records))
    }
}

fn distinct_member_types(records: &[MetadataRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(MetadataRecord::member_type)
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .map(String::from)
        .collect()
}
