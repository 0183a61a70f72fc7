use thiserror::Error;

/// Failure to reach the document store.
///
/// Carries only rendered messages so one attempt's outcome can be cloned to
/// every caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Invalid connection string: {0}")]
    InvalidUri(String),

    #[error("Database unreachable: {0}")]
    Unreachable(String),

    #[error("Connection attempt aborted: {0}")]
    Aborted(String),
}

impl From<mongodb::error::Error> for ConnectionError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            mongodb::error::ErrorKind::InvalidArgument { message, .. } => {
                ConnectionError::InvalidUri(message.clone())
            }
            _ => ConnectionError::Unreachable(err.to_string()),
        }
    }
}
