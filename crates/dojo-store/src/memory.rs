//! In-memory player backend.

use std::collections::BTreeMap;
use std::sync::Mutex;

use dojo_core::{PlayerId, PlayerState};

use crate::backend::PlayerBackend;
use crate::error::{StoreError, StoreResult};

/// Keeps records in a map. Useful for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Mutex<BTreeMap<PlayerId, PlayerState>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerBackend for MemoryBackend {
    fn read(&self, id: &PlayerId) -> StoreResult<Option<PlayerState>> {
        let records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.get(id).cloned())
    }

    fn write(&self, id: &PlayerId, state: &PlayerState) -> StoreResult<()> {
        let mut records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        records.insert(id.clone(), state.clone());
        Ok(())
    }

    fn player_ids(&self) -> StoreResult<Vec<PlayerId>> {
        let records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.keys().cloned().collect())
    }
}
