use serde::de::DeserializeOwned;
use tracing::instrument;

use busbar_sf_client::QueryResult;

use crate::error::Result;
use crate::types::MetadataRecord;

impl super::ToolingClient {
    /// Execute a SOQL query against the Tooling API.
    ///
    /// Returns the first batch of results only.
    ///
    /// # Security
    ///
    /// **IMPORTANT**: If you are including user-provided values in the WHERE clause,
    /// you MUST escape them to prevent SOQL injection attacks:
    ///
    /// ```rust,ignore
    /// use busbar_sf_client::security::soql;
    ///
    /// let query = format!(
    ///     "SELECT Id FROM SourceMember WHERE MemberName = {}",
    ///     soql::literal(user_input)
    /// );
    /// ```
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        self.client.tooling_query(soql).await.map_err(Into::into)
    }

    /// Execute a SOQL query and return its rows as [`MetadataRecord`]s.
    ///
    /// A status other than 200 fails with
    /// [`ErrorKind::RemoteQuery`](crate::ErrorKind::RemoteQuery) carrying the
    /// status and the response body verbatim.
    #[instrument(skip(self))]
    pub async fn query_records(&self, soql: &str) -> Result<Vec<MetadataRecord>> {
        let result: QueryResult<MetadataRecord> = self.query(soql).await?;
        Ok(result.records)
    }
}
