//! Error types for the change export pipeline.

use std::path::PathBuf;

use busbar_sf_tooling::ErrorKind as ToolingErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Wrap a failure that happened after `csv` was already written.
    pub(crate) fn manifest(csv: impl Into<PathBuf>, cause: Error) -> Self {
        Self {
            kind: ErrorKind::Manifest {
                csv: csv.into(),
                message: cause.to_string(),
            },
            source: Some(Box::new(cause)),
        }
    }

    /// Returns true if the org rejected the access token (HTTP 401).
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::RemoteQuery { status: 401, .. })
    }

    /// Short name of the error kind, for exit messages.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ErrorKind::Configuration(_) => "configuration",
            ErrorKind::RemoteQuery { .. } => "remote query",
            ErrorKind::Credentials(_) => "credentials",
            ErrorKind::Client(_) => "client",
            ErrorKind::Io(_) => "io",
            ErrorKind::Csv(_) => "csv",
            ErrorKind::InconsistentRecord { .. } => "inconsistent record",
            ErrorKind::Manifest { .. } => "manifest",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Required input is missing or unusable. Nothing was written.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The Tooling API answered with a status other than 200. Nothing was written.
    #[error("Failed to run query: {status} {body}")]
    RemoteQuery { status: u16, body: String },

    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Transport or decoding failure below the query layer.
    #[error("Client error: {0}")]
    Client(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("CSV error: {0}")]
    Csv(String),

    /// Record at `index` does not have the same fields as the first record.
    #[error("Record {index} has a different field set than the first record")]
    InconsistentRecord { index: usize },

    /// The manifest could not be produced; the CSV at `csv` was written.
    #[error("Manifest not written ({message}); CSV already written to {}", .csv.display())]
    Manifest { csv: PathBuf, message: String },
}

impl From<busbar_sf_tooling::Error> for Error {
    fn from(err: busbar_sf_tooling::Error) -> Self {
        let kind = match &err.kind {
            ToolingErrorKind::Configuration(msg) => ErrorKind::Configuration(msg.clone()),
            ToolingErrorKind::RemoteQuery { status, body } => ErrorKind::RemoteQuery {
                status: *status,
                body: body.clone(),
            },
            ToolingErrorKind::Client(msg) => ErrorKind::Client(msg.clone()),
        };
        Error::with_source(kind, err)
    }
}

impl From<busbar_sf_auth::Error> for Error {
    fn from(err: busbar_sf_auth::Error) -> Self {
        Error::with_source(ErrorKind::Credentials(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            return Error::with_source(ErrorKind::Io(err.to_string()), err);
        }
        Error::with_source(ErrorKind::Csv(err.to_string()), err)
    }
}
