//! Error types for the bootstrap

use std::path::PathBuf;
use thiserror::Error;

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The store could not be opened or created
    #[error("store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A schema or bookkeeping statement was rejected by the engine
    #[error("statement for `{object}` rejected: {source}")]
    StatementRejected {
        object: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Writing a connectivity artifact failed (non-fatal for the bootstrap)
    #[error("could not write {}: {source}", .path.display())]
    AuxiliaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Fatal errors abort the bootstrap; auxiliary write failures only warn.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::AuxiliaryWrite { .. })
    }
}
