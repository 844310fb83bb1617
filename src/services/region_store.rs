//! Region store - validated, ordered collection of geofences
//!
//! Regions enter the store only through `create`, which enforces the
//! region invariants up front. The store owns the JSON serialization
//! contract used by the durable byte store; persistence itself lives in
//! `io::storage`.

use crate::domain::region::{Region, RegionDraft, RegionShape};
use crate::domain::types::RegionId;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Rejection reasons for a region candidate
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("region name must not be empty")]
    EmptyName,
    #[error("circle radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("coordinates must be finite numbers")]
    NonFiniteCoordinate,
    #[error("region id {0} already exists")]
    DuplicateId(RegionId),
}

/// Generate a new UUIDv7 region id (time-sortable)
fn new_region_id() -> RegionId {
    RegionId(Uuid::now_v7().to_string())
}

/// In-memory ordered collection of region definitions
#[derive(Debug, Default)]
pub struct RegionStore {
    regions: Vec<Region>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self { regions: Vec::new() }
    }

    /// Rebuild a store from previously persisted regions
    ///
    /// Used at process start; the regions were validated when first
    /// created, so they are accepted as-is.
    pub fn from_regions(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Check a candidate against the region invariants
    pub fn validate(&self, draft: &RegionDraft) -> Result<(), ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        match &draft.shape {
            RegionShape::Circle { center, radius } => {
                if !center.is_finite() || !radius.is_finite() {
                    return Err(ValidationError::NonFiniteCoordinate);
                }
                if *radius <= 0.0 {
                    return Err(ValidationError::NonPositiveRadius(*radius));
                }
            }
            RegionShape::Polygon { points } => {
                if points.len() < 3 {
                    return Err(ValidationError::TooFewPoints(points.len()));
                }
                if points.iter().any(|p| !p.is_finite()) {
                    return Err(ValidationError::NonFiniteCoordinate);
                }
            }
        }

        if let Some(id) = &draft.id {
            if self.regions.iter().any(|r| &r.id == id) {
                return Err(ValidationError::DuplicateId(id.clone()));
            }
        }

        Ok(())
    }

    /// Validate a candidate, assign an id if absent, and append it
    pub fn create(&mut self, draft: RegionDraft) -> Result<Region, ValidationError> {
        self.validate(&draft)?;

        let region = Region {
            id: draft.id.unwrap_or_else(new_region_id),
            name: draft.name,
            shape: draft.shape,
            color: draft.color,
        };

        debug!(region_id = %region.id, name = %region.name, "region_created");
        self.regions.push(region.clone());
        Ok(region)
    }

    /// Remove a region by id; returns whether one was found and removed
    pub fn delete(&mut self, id: &RegionId) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| &r.id != id);
        let removed = self.regions.len() < before;
        if removed {
            debug!(region_id = %id, "region_deleted");
        }
        removed
    }

    /// Snapshot of current regions in insertion order
    pub fn list(&self) -> Vec<Region> {
        self.regions.clone()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Encode the region list as the persisted JSON array
    pub fn serialize(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.regions)
    }

    /// Decode a persisted JSON array back into regions
    ///
    /// Lossless counterpart of `serialize`; corrupt bytes surface as an
    /// error for the storage boundary to degrade on.
    pub fn deserialize(bytes: &[u8]) -> serde_json::Result<Vec<Region>> {
        serde_json::from_slice(bytes)
    }
}
