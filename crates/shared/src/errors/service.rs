use crate::errors::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database not connected")]
    NotConnected,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(RepositoryError),

    #[error("Write failed: {0}")]
    Write(RepositoryError),
}
