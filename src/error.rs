use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccountError>;

/// Failure taxonomy shared by every layer.
///
/// Store adapters and the service propagate these unchanged; the HTTP
/// layer maps them onto status codes and the generic response envelope.
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("order_by param is invalid")]
    InvalidOrderBy,
    #[error("account {0} not found")]
    NotFound(i64),
    #[error("account {0} already exists")]
    DuplicateKey(i64),
    #[error("store error: {0}")]
    Store(#[from] mongodb::error::Error),
    #[error("failed to decode account document: {0}")]
    Decode(String),
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}
