//! File-based player backend.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use dojo_core::{PlayerId, PlayerState};

use crate::backend::PlayerBackend;
use crate::error::{StoreError, StoreResult};

/// Stores each player as a pretty-printed JSON document, `<dir>/<id>.json`.
///
/// Writes go to `<id>.json.tmp`, are flushed to disk, then renamed over the
/// record, so an interrupted write leaves the previous record intact. On Unix
/// the directory is synced after the rename.
#[derive(Debug, Clone)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a directory of player records.
    pub fn open(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(|source| StoreError::Io {
            path: base_dir.clone(),
            source,
        })?;
        Ok(Self { base_dir })
    }

    fn record_path(&self, id: &PlayerId) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }

    /// Flush the directory entry so a completed rename survives a crash.
    #[cfg(unix)]
    fn sync_dir(&self) -> StoreResult<()> {
        File::open(&self.base_dir)
            .and_then(|dir| dir.sync_all())
            .map_err(|e| io_error(&self.base_dir, e))
    }

    #[cfg(not(unix))]
    fn sync_dir(&self) -> StoreResult<()> {
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl PlayerBackend for FileBackend {
    fn read(&self, id: &PlayerId) -> StoreResult<Option<PlayerState>> {
        let path = self.record_path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };
        let state = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            player: id.clone(),
            source,
        })?;
        tracing::trace!(player = %id, path = %path.display(), "loaded player record");
        Ok(Some(state))
    }

    fn write(&self, id: &PlayerId, state: &PlayerState) -> StoreResult<()> {
        let path = self.record_path(id);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(state).map_err(|source| StoreError::Serialize {
            player: id.clone(),
            source,
        })?;

        let mut file = File::create(&temp_path).map_err(|e| io_error(&temp_path, e))?;
        file.write_all(&bytes).map_err(|e| io_error(&temp_path, e))?;
        file.sync_all().map_err(|e| io_error(&temp_path, e))?;
        drop(file);

        // Atomic replace
        fs::rename(&temp_path, &path).map_err(|e| io_error(&path, e))?;
        self.sync_dir()?;

        tracing::trace!(player = %id, path = %path.display(), "saved player record");
        Ok(())
    }

    fn player_ids(&self) -> StoreResult<Vec<PlayerId>> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| io_error(&self.base_dir, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&self.base_dir, e))?;
            let path = entry.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(stem) = filename.strip_suffix(".json")
                && let Ok(id) = PlayerId::parse(stem)
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
