use thiserror::Error;

/// Unified error type for chart, ledger, period, and storage operations.
///
/// Every variant is local to a single operation: when a service returns an
/// error, the aggregate it operated on is unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Period closed: {0}")]
    PeriodClosed(String),
    #[error("Invalid {domain} reference: {id}")]
    Reference { domain: String, id: String },
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}
