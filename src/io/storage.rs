//! Durable region storage - one JSON document on disk
//!
//! The region list is persisted as a single JSON array under a known
//! path. Storage failures never propagate: an absent or corrupt file
//! loads as an empty list, and a failed write leaves the system running
//! in-memory-only. Both cases are logged.

use crate::domain::region::Region;
use crate::services::region_store::RegionStore;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// File-backed byte store for the persisted region format
pub struct RegionStorage {
    path: PathBuf,
}

impl RegionStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load persisted regions, degrading to an empty list on any failure
    pub fn load(&self) -> Vec<Region> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "region_storage_absent");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "region_storage_read_failed");
                return Vec::new();
            }
        };

        match RegionStore::deserialize(&bytes) {
            Ok(regions) => {
                info!(path = %self.path.display(), regions = %regions.len(), "regions_loaded");
                regions
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "region_storage_corrupt");
                Vec::new()
            }
        }
    }

    /// Persist the current region list
    /// Returns true if successful, false otherwise
    pub fn save(&self, store: &RegionStore) -> bool {
        let bytes = match store.serialize() {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "region_encode_failed");
                return false;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    error!(path = %self.path.display(), error = %e, "region_storage_mkdir_failed");
                    return false;
                }
            }
        }

        match fs::write(&self.path, bytes) {
            Ok(()) => {
                info!(path = %self.path.display(), regions = %store.len(), "regions_saved");
                true
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "region_storage_write_failed");
                false
            }
        }
    }
}
