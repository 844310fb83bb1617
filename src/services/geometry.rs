//! Containment geometry for circle and polygon regions
//!
//! Pure functions, no state. Safe to call from any number of tasks.

use crate::domain::region::{Region, RegionShape};
use crate::domain::types::Point;

/// Mean Earth radius in meters, used by the haversine distance
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters (haversine)
pub fn haversine_distance(a: &Point, b: &Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin() * (delta_lat / 2.0).sin()
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin() * (delta_lng / 2.0).sin();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Point-in-circle test, boundary inclusive
///
/// A point exactly on the circle boundary (distance == radius) counts
/// as inside.
pub fn contains_circle(p: &Point, center: &Point, radius: f64) -> bool {
    haversine_distance(p, center) <= radius
}

/// Point-in-polygon test using the even-odd ray casting rule
///
/// Casts a ray east from `p` and toggles on each edge crossing, iterating
/// edges as `(points[i], points[j])` with `j` the wrapping predecessor.
/// Points exactly on an edge or vertex classify by the crossing branch
/// as written (strict `>` on the longitude comparison, strict `<` on the
/// intersection test); callers must not rely on a cleaner boundary rule.
///
/// Returns false for fewer than 3 points.
pub fn contains_polygon(p: &Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (points[i].lat, points[i].lng);
        let (xj, yj) = (points[j].lat, points[j].lng);

        let intersect = ((yi > p.lng) != (yj > p.lng))
            && (p.lat < (xj - xi) * (p.lng - yi) / (yj - yi) + xi);
        if intersect {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Containment test for any region shape
///
/// Malformed shape values (non-finite coordinates, non-positive or
/// non-finite radius, short polygon) classify as outside rather than
/// erroring, so one corrupt region cannot block a whole evaluation.
pub fn contains(p: &Point, region: &Region) -> bool {
    if !p.is_finite() {
        return false;
    }

    match &region.shape {
        RegionShape::Circle { center, radius } => {
            if !center.is_finite() || !radius.is_finite() || *radius <= 0.0 {
                return false;
            }
            contains_circle(p, center, *radius)
        }
        RegionShape::Polygon { points } => {
            if points.len() < 3 || points.iter().any(|pt| !pt.is_finite()) {
                return false;
            }
            contains_polygon(p, points)
        }
    }
}
