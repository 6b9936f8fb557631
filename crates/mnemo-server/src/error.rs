// crates/mnemo-server/src/error.rs
// Standardized error types for Mnemo

use thiserror::Error;

/// Main error type for the Mnemo library
#[derive(Error, Debug)]
pub enum MnemoError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// Convenience type alias for Result using MnemoError
pub type Result<T> = std::result::Result<T, MnemoError>;
