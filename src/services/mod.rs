//! Services - business logic and state management
//!
//! This module contains the core geofencing services:
//! - `geometry` - containment predicates (haversine circle, ray-cast polygon)
//! - `detector` - edge-triggered zone transition detection
//! - `region_store` - validated region collection and serialization contract
//! - `monitor` - sample loop tying store, detector, sink, and metrics together

pub mod detector;
pub mod geometry;
pub mod monitor;
pub mod region_store;

// Re-export commonly used types
pub use detector::TransitionDetector;
pub use monitor::Monitor;
pub use region_store::{RegionStore, ValidationError};
