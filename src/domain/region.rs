//! Region data model - named geofences and their persisted form
//!
//! The serialized shape matches the store format exactly: a flat JSON
//! object with a `"type"` tag and shape-specific fields
//! (`center`/`radius` for circles, `points` for polygons).

use crate::domain::types::{Point, RegionId};
use serde::{Deserialize, Serialize};

/// Geometric shape of a region
///
/// Tagged serialization keeps the wire form flat:
/// `{"type":"circle","center":{...},"radius":500.0}` or
/// `{"type":"polygon","points":[{...},...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RegionShape {
    Circle { center: Point, radius: f64 },
    Polygon { points: Vec<Point> },
}

/// A named geofence
///
/// Immutable after creation; replacing a region means delete + create
/// under a fresh id. `color` is a display hint carried for the authoring
/// surface and ignored by containment logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    #[serde(flatten)]
    pub shape: RegionShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// An unvalidated region candidate from the authoring surface
///
/// Becomes a `Region` only after passing store validation; the store
/// assigns an id when the draft carries none.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionDraft {
    #[serde(default)]
    pub id: Option<RegionId>,
    pub name: String,
    #[serde(flatten)]
    pub shape: RegionShape,
    #[serde(default)]
    pub color: Option<String>,
}

impl RegionDraft {
    pub fn circle(name: &str, center: Point, radius: f64) -> Self {
        Self { id: None, name: name.to_string(), shape: RegionShape::Circle { center, radius }, color: None }
    }

    pub fn polygon(name: &str, points: Vec<Point>) -> Self {
        Self { id: None, name: name.to_string(), shape: RegionShape::Polygon { points }, color: None }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_id(mut self, id: RegionId) -> Self {
        self.id = Some(id);
        self
    }
}
