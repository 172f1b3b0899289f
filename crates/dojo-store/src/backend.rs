use dojo_core::{PlayerId, PlayerState};

use crate::error::StoreResult;

/// Raw record storage underneath [`crate::PlayerStore`].
///
/// Backends only move whole records; locking and defaults live in the store.
pub trait PlayerBackend: Send + Sync {
    /// Read a record. `Ok(None)` when the player has never been saved.
    fn read(&self, id: &PlayerId) -> StoreResult<Option<PlayerState>>;

    /// Replace a record. A reader must never observe a partial write.
    fn write(&self, id: &PlayerId, state: &PlayerState) -> StoreResult<()>;

    /// Every player with a stored record, sorted.
    fn player_ids(&self) -> StoreResult<Vec<PlayerId>>;
}
