use dojo_store::StoreError;
use thiserror::Error;

/// Result type for training operations.
pub type TrainingResult<T> = Result<T, TrainingError>;

/// Errors raised while advancing trainings.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// A player record could not be read or written.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A tick was cancelled or panicked on the blocking pool.
    #[error("training tick aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}
