//! Fetch, persist and transform: the change export pipeline.

use std::path::{Path, PathBuf};

use busbar_sf_metadata::PackageManifest;
use busbar_sf_tooling::{MetadataRecord, SourceMemberQuery, ToolingClient};
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::export::{read_records, write_records, WriteOutcome};

/// Default CSV destination.
pub const DEFAULT_CSV_PATH: &str = "output.csv";

/// Default manifest destination.
pub const DEFAULT_PACKAGE_XML_PATH: &str = "package.xml";

/// Where a run writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub csv: PathBuf,
    pub package_xml: PathBuf,
}

impl OutputPaths {
    pub fn new(csv: impl Into<PathBuf>, package_xml: impl Into<PathBuf>) -> Self {
        Self {
            csv: csv.into(),
            package_xml: package_xml.into(),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::new(DEFAULT_CSV_PATH, DEFAULT_PACKAGE_XML_PATH)
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// CSV and manifest were both written.
    Completed {
        csv: PathBuf,
        rows: usize,
        manifest: PathBuf,
    },
    /// The query matched nothing; no files were written.
    NoRecords,
}

/// State carried between type discovery and the final query.
///
/// Holds the org connection, the user filter, the member types selected for
/// the final query and the types found by [`discover_types`](Self::discover_types).
#[derive(Debug, Clone)]
pub struct ChangeSession {
    client: ToolingClient,
    changed_by: String,
    member_types: Vec<String>,
    discovered_types: Vec<String>,
}

impl ChangeSession {
    pub fn new(client: ToolingClient, changed_by: impl Into<String>) -> Self {
        Self {
            client,
            changed_by: changed_by.into(),
            member_types: Vec::new(),
            discovered_types: Vec::new(),
        }
    }

    /// Restrict the final query to these member types.
    pub fn with_member_types<I, S>(mut self, member_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_types = member_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn client(&self) -> &ToolingClient {
        &self.client
    }

    pub fn changed_by(&self) -> &str {
        &self.changed_by
    }

    pub fn member_types(&self) -> &[String] {
        &self.member_types
    }

    /// Types found by the last [`discover_types`](Self::discover_types) call.
    pub fn discovered_types(&self) -> &[String] {
        &self.discovered_types
    }

    /// The filter the final query runs with.
    pub fn query(&self) -> SourceMemberQuery {
        SourceMemberQuery::new(self.changed_by.as_str())
            .with_member_types(self.member_types.iter().cloned())
    }

    /// Find the distinct member types the user changed and remember them.
    ///
    /// Types are in first-occurrence order. Nothing is written to disk.
    #[instrument(skip(self), fields(changed_by = %self.changed_by))]
    pub async fn discover_types(&mut self) -> Result<&[String]> {
        self.discovered_types = self
            .client
            .member_types_changed_by(&self.changed_by)
            .await?;
        info!(count = self.discovered_types.len(), "Member types discovered");
        Ok(&self.discovered_types)
    }

    /// Run the final query, write the CSV and then the manifest.
    ///
    /// A blank user or a failed query writes nothing. When the query matches
    /// no rows, nothing is written and [`RunOutcome::NoRecords`] is returned.
    /// A manifest failure after the CSV was written is reported as
    /// [`ErrorKind::Manifest`](crate::ErrorKind::Manifest), naming the CSV.
    #[instrument(skip(self), fields(changed_by = %self.changed_by))]
    pub async fn run(&self, outputs: &OutputPaths) -> Result<RunOutcome> {
        let records = self.client.source_members(&self.query()).await?;

        let rows = match write_records(&records, &outputs.csv)? {
            WriteOutcome::Written { rows } => rows,
            WriteOutcome::NoRecords => return Ok(RunOutcome::NoRecords),
        };

        write_manifest(&records, self.client.api_version(), &outputs.package_xml)
            .map_err(|err| Error::manifest(outputs.csv.clone(), err))?;

        Ok(RunOutcome::Completed {
            csv: outputs.csv.clone(),
            rows,
            manifest: outputs.package_xml.clone(),
        })
    }
}

/// Group records by `MemberType` into a manifest.
pub fn build_manifest(records: &[MetadataRecord], api_version: &str) -> PackageManifest {
    PackageManifest::from_members(
        api_version,
        records
            .iter()
            .map(|record| (record.member_type(), record.member_name())),
    )
}

/// Build the manifest for `records` and write it to `destination`.
#[instrument(skip(records), fields(records = records.len()))]
pub fn write_manifest(
    records: &[MetadataRecord],
    api_version: &str,
    destination: &Path,
) -> Result<PackageManifest> {
    let manifest = build_manifest(records, api_version);
    std::fs::write(destination, manifest.to_package_xml())?;
    info!(types = manifest.len(), "package.xml saved to {}", destination.display());
    Ok(manifest)
}

/// Rebuild the manifest from a CSV written by an earlier run.
///
/// When the CSV has no data rows, nothing is written and `None` is returned.
#[instrument]
pub fn regenerate_manifest(
    csv: &Path,
    package_xml: &Path,
    api_version: &str,
) -> Result<Option<PackageManifest>> {
    let records = read_records(csv)?;
    if records.is_empty() {
        warn!("No records found in {}; package.xml not written", csv.display());
        return Ok(None);
    }
    write_manifest(&records, api_version, package_xml).map(Some)
}
