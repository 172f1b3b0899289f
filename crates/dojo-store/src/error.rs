//! Error types for player storage.

use std::path::PathBuf;

use dojo_core::{InvalidPlayerId, PlayerId};
use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by player storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a record failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A stored record could not be parsed.
    #[error("corrupted record for player {player}: {source}")]
    Corrupt {
        /// Owner of the record.
        player: PlayerId,
        /// Parse failure.
        source: serde_json::Error,
    },

    /// A record could not be encoded.
    #[error("cannot encode record for player {player}: {source}")]
    Serialize {
        /// Owner of the record.
        player: PlayerId,
        /// Encoding failure.
        source: serde_json::Error,
    },

    /// A player identifier is unusable as a key.
    #[error(transparent)]
    InvalidPlayerId(#[from] InvalidPlayerId),

    /// A lock was poisoned by a panicking writer.
    #[error("player store lock was poisoned")]
    LockPoisoned,
}
