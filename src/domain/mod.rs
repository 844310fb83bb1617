//! Domain models - core geofencing types
//!
//! This module contains the canonical data types used throughout the system:
//! - `Point` / `LocationSample` - positions delivered by the location provider
//! - `Region` / `RegionShape` - a named geofence (circle or polygon)
//! - `RegionDraft` - an unvalidated region candidate from the authoring surface
//! - `GeofenceEvent` - edge-triggered Enter/Exit notification

pub mod region;
pub mod types;

// Re-export commonly used types at module level
pub use region::{Region, RegionDraft, RegionShape};
pub use types::{EventKind, GeofenceEvent, LocationSample, Point, RegionId};
