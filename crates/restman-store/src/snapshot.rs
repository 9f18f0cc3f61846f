//! # Restaurant Snapshot
//!
//! The whole restaurant (stock, menu, staff, tables, live orders) saved as a
//! single JSON document and restored on start-up.
//!
//! ```text
//! start-up                              shutdown / after each command
//!    │                                        │
//!    ▼                                        ▼
//! load() ── missing or unreadable ──► None    save(&restaurant)
//!    │                                        │ restaurant.json.tmp
//!    ▼                                        ▼ rename
//! Some(Restaurant)                         restaurant.json
//! ```

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use restman_core::Restaurant;

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. `Ok(None)` when there is no file yet.
    pub fn try_load(&self) -> StoreResult<Option<Restaurant>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Reads the snapshot, treating any failure as "no snapshot".
    pub fn load(&self) -> Option<Restaurant> {
        match self.try_load() {
            Ok(Some(restaurant)) => {
                info!(path = ?self.path, "Restaurant restored from snapshot");
                Some(restaurant)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Ignoring unreadable snapshot");
                None
            }
        }
    }

    /// Loads the snapshot, or starts a fresh restaurant.
    pub fn load_or_new(&self) -> Restaurant {
        self.load().unwrap_or_default()
    }

    pub fn try_save(&self, restaurant: &Restaurant) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(restaurant)?;
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, json).map_err(|e| StoreError::io(&temp, e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    /// Saves the snapshot. Returns false (and logs) on failure.
    pub fn save(&self, restaurant: &Restaurant) -> bool {
        match self.try_save(restaurant) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to save snapshot");
                false
            }
        }
    }
}
