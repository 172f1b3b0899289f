//! Durable per-player state storage for Dojo.
//!
//! [`PlayerStore`] hands out default state for unknown players, serializes
//! work per player with an in-process lock table, and delegates raw record
//! I/O to a [`PlayerBackend`]. [`FileBackend`] keeps one JSON document per
//! player and replaces it atomically (write to a temp file, then rename).

/// The backend trait.
pub mod backend;
/// Error types.
pub mod error;
/// File-based backend.
pub mod file;
/// In-memory backend.
pub mod memory;
/// The locking store facade.
pub mod store;

pub use backend::PlayerBackend;
pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use store::PlayerStore;
