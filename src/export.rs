//! CSV export of `SourceMember` records.

use std::path::Path;

use busbar_sf_tooling::MetadataRecord;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::error::{Error, ErrorKind, Result};

/// What [`write_records`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was written with a header and `rows` data rows.
    Written { rows: usize },
    /// There was nothing to write; no file was created.
    NoRecords,
}

/// Write `records` to a CSV file at `destination`.
///
/// The header is the field names of the first record, in the order the API
/// returned them. Every other record must carry the same set of fields; the
/// check runs before the file is created.
///
/// Rows are staged in a temporary file next to `destination` and moved into
/// place once complete, so a failed write never leaves a partial CSV.
///
/// Cells: strings as-is, `null` as empty, numbers and booleans as their JSON
/// text, nested objects and arrays as compact JSON.
#[instrument(skip_all, fields(records = records.len(), destination = %destination.as_ref().display()))]
pub fn write_records(
    records: &[MetadataRecord],
    destination: impl AsRef<Path>,
) -> Result<WriteOutcome> {
    let Some(first) = records.first() else {
        warn!("No records found; nothing written");
        return Ok(WriteOutcome::NoRecords);
    };

    let header: Vec<&str> = first.field_names().collect();
    if let Some(index) = records
        .iter()
        .position(|record| !has_fields(record, &header))
    {
        return Err(Error::new(ErrorKind::InconsistentRecord { index }));
    }

    let destination = destination.as_ref();
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut writer = csv::Writer::from_writer(tempfile::NamedTempFile::new_in(dir)?);
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|field| render_cell(record.get(field))))?;
    }
    let staged = writer.into_inner().map_err(|err| err.into_error())?;
    staged.persist(destination).map_err(|err| err.error)?;

    info!(rows = records.len(), "CSV file saved to {}", destination.display());
    Ok(WriteOutcome::Written {
        rows: records.len(),
    })
}

/// Read records back from a CSV written by [`write_records`].
///
/// Every value comes back as a JSON string, in header order.
#[instrument(skip_all, fields(source = %source.as_ref().display()))]
pub fn read_records(source: impl AsRef<Path>) -> Result<Vec<MetadataRecord>> {
    let mut reader = csv::Reader::from_path(source.as_ref())?;
    let header = reader.headers()?.clone();

    let mut records: Vec<MetadataRecord> = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(
            header
                .iter()
                .zip(row.iter())
                .map(|(field, value)| (field, Value::from(value)))
                .collect(),
        );
    }
    Ok(records)
}

fn has_fields(record: &MetadataRecord, header: &[&str]) -> bool {
    record.len() == header.len() && header.iter().all(|field| record.get(field).is_some())
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
