use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use dojo_core::{PlayerId, PlayerState};

use crate::backend::PlayerBackend;
use crate::error::{StoreError, StoreResult};
use crate::file::FileBackend;
use crate::memory::MemoryBackend;

/// Durable per-player state, keyed by player ID.
///
/// Every operation on one player runs under that player's lock, so two
/// load-modify-save cycles for the same player never interleave inside a
/// process. Different players never wait on each other beyond the brief
/// lock-table lookup.
pub struct PlayerStore {
    backend: Box<dyn PlayerBackend>,
    // One entry per player touched in this process, never pruned. Bounded by
    // the number of player records.
    locks: Mutex<HashMap<PlayerId, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for PlayerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let locks = self.locks.lock().map(|l| l.len()).unwrap_or_default();
        f.debug_struct("PlayerStore")
            .field("locks", &locks)
            .finish_non_exhaustive()
    }
}

impl PlayerStore {
    /// Wrap a backend.
    pub fn new(backend: impl PlayerBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// A store backed by one JSON file per player under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(FileBackend::open(dir)?))
    }

    /// A store that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    fn player_lock(&self, id: &PlayerId) -> StoreResult<Arc<Mutex<()>>> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(Arc::clone(locks.entry(id.clone()).or_default()))
    }

    /// Load a player's state, or the default state if none was ever saved.
    pub fn get(&self, id: &PlayerId) -> StoreResult<PlayerState> {
        let lock = self.player_lock(id)?;
        // Records are replaced atomically, so a poisoned player lock guards nothing torn.
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.backend.read(id)?.unwrap_or_default())
    }

    /// Replace a player's state.
    pub fn put(&self, id: &PlayerId, state: &PlayerState) -> StoreResult<()> {
        let lock = self.player_lock(id)?;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.backend.write(id, state)?;
        tracing::debug!(player = %id, "player saved");
        Ok(())
    }

    /// Run a load-modify-save cycle while holding the player's lock.
    ///
    /// The state is written back only when `f` succeeds and actually changed
    /// it; an error from `f` leaves the stored record untouched.
    pub fn update<T, E, F>(&self, id: &PlayerId, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PlayerState) -> Result<T, E>,
        E: From<StoreError>,
    {
        let lock = self.player_lock(id)?;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());

        let before = self.backend.read(id)?.unwrap_or_default();
        let mut state = before.clone();
        let output = f(&mut state)?;

        if state != before {
            self.backend.write(id, &state)?;
            tracing::debug!(player = %id, "player updated");
        }
        Ok(output)
    }

    /// Every player with a stored record.
    pub fn player_ids(&self) -> StoreResult<Vec<PlayerId>> {
        self.backend.player_ids()
    }
}
