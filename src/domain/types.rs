//! Shared types for geofence tracking

use crate::domain::region::Region;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Newtype wrapper for region IDs to provide type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct RegionId(pub String);

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        RegionId(s.to_string())
    }
}

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A single position fix from the location provider
///
/// Immutable once created. `accuracy` is the provider's estimated error
/// radius in meters, when it reports one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl LocationSample {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, accuracy: None, timestamp: Utc::now() }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point { lat: self.lat, lng: self.lng }
    }
}

/// Kind of zone transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Enter,
    Exit,
}

impl EventKind {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Enter => "enter",
            EventKind::Exit => "exit",
        }
    }
}

/// Edge-triggered zone transition event
///
/// Produced only by the transition detector when a region's containment
/// state flips between consecutive evaluations. Delivered synchronously to
/// the event sink and not retained by the core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeofenceEvent {
    pub kind: EventKind,
    pub region: Region,
    pub location: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl GeofenceEvent {
    pub fn new(kind: EventKind, region: &Region, sample: &LocationSample) -> Self {
        Self {
            kind,
            region: region.clone(),
            location: sample.point(),
            accuracy: sample.accuracy,
            timestamp: sample.timestamp,
        }
    }
}
