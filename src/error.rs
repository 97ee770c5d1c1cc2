use thiserror::Error;

/// Errors that can occur while recording or analyzing measurements.
#[derive(Error, Debug)]
pub enum MangroveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Record not found: no observation with id {0}")]
    NotFound(i64),
}
