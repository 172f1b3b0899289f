//! Error types for world data and player identity.

use std::path::PathBuf;

use thiserror::Error;

/// Alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading world data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The world file could not be read.
    #[error("cannot read world file {path}: {source}")]
    Io {
        /// Path of the world file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The world document is not valid JSON or does not match the scene schema.
    #[error("malformed world data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but is unusable.
    #[error("invalid world data: {0}")]
    Invalid(String),
}

/// A player identifier that cannot be used as a record key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid player id {0:?}: use ASCII letters, digits, '-' or '_'")]
pub struct InvalidPlayerId(pub String);
