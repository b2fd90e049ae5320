//! Error types for sf-tooling.

use busbar_sf_client::ErrorKind as ClientErrorKind;

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

    /// Returns true if the query could not be built from the given input.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Required input is missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The query endpoint answered with a status other than 200.
    #[error("Failed to run query: {status} {body}")]
    RemoteQuery { status: u16, body: String },

    #[error("Client error: {0}")]
    Client(String),
}

impl From<busbar_sf_client::Error> for Error {
    fn from(err: busbar_sf_client::Error) -> Self {
        let kind = match &err.kind {
            ClientErrorKind::Http { status, body } => ErrorKind::RemoteQuery {
                status: *status,
                body: body.clone(),
            },
            _ => ErrorKind::Client(err.to_string()),
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_becomes_remote_query() {
        let client_err = busbar_sf_client::Error::new(ClientErrorKind::Http {
            status: 401,
            body: "[{\"errorCode\":\"INVALID_SESSION_ID\"}]".to_string(),
        });

        let err: Error = client_err.into();
        match err.kind {
            ErrorKind::RemoteQuery { status, ref body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "[{\"errorCode\":\"INVALID_SESSION_ID\"}]");
            }
            ref other => panic!("unexpected kind: {other:?}"),
        }
        assert!(err.source.is_some());
    }

    #[test]
    fn test_transport_error_stays_client_error() {
        let client_err = busbar_sf_client::Error::new(ClientErrorKind::Timeout);
        let err: Error = client_err.into();
        assert!(matches!(err.kind, ErrorKind::Client(_)));
        assert!(!err.is_configuration());
    }
}
