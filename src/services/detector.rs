//! Edge-triggered zone transition detection
//!
//! Holds the set of region ids the tracked point currently occupies and
//! converts per-sample containment results into Enter/Exit events. Each
//! region behaves as a two-state machine (Outside/Inside, initially
//! Outside); repeated Inside results produce no repeated events.

use crate::domain::region::Region;
use crate::domain::types::{EventKind, GeofenceEvent, LocationSample, RegionId};
use crate::services::geometry;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Per-evaluation event buffer; most samples flip at most a region or two
pub type Events = SmallVec<[GeofenceEvent; 2]>;

/// Stateful detector converting containment results into transition events
///
/// Owns its membership state exclusively. `evaluate` performs a
/// read-modify-write of that state and must be called sequentially per
/// instance; serialize samples through a single consumer if multiple
/// producers exist.
pub struct TransitionDetector {
    /// Region ids the tracked point was inside at the previous sample
    inside: FxHashSet<RegionId>,
}

impl TransitionDetector {
    /// Create a detector with empty membership (everything starts Outside)
    pub fn new() -> Self {
        Self { inside: FxHashSet::default() }
    }

    /// Evaluate one sample against the given region snapshot
    ///
    /// Emits Enter for each region newly containing the point and Exit for
    /// each region that stopped containing it, in region iteration order.
    /// Membership is replaced wholesale: a region absent from `regions`
    /// (deleted by the authoring surface) is dropped silently, with no
    /// synthetic Exit.
    ///
    /// Never fails on well-formed input; regions with malformed shapes
    /// evaluate as never-contained.
    pub fn evaluate(&mut self, sample: &LocationSample, regions: &[Region]) -> Events {
        let point = sample.point();
        let mut next = FxHashSet::default();
        let mut events = Events::new();

        for region in regions {
            let is_inside = geometry::contains(&point, region);
            let was_inside = self.inside.contains(&region.id);

            if is_inside {
                next.insert(region.id.clone());
                if !was_inside {
                    events.push(GeofenceEvent::new(EventKind::Enter, region, sample));
                }
            } else if was_inside {
                events.push(GeofenceEvent::new(EventKind::Exit, region, sample));
            }
        }

        self.inside = next;
        events
    }

    /// Number of regions currently occupied
    pub fn occupied_count(&self) -> usize {
        self.inside.len()
    }

    /// Whether the tracked point was inside the given region at the last sample
    pub fn is_inside(&self, id: &RegionId) -> bool {
        self.inside.contains(id)
    }
}

impl Default for TransitionDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::region::RegionShape;
    use crate::domain::types::Point;

    fn circle_region(id: &str, center: Point, radius: f64) -> Region {
        Region {
            id: RegionId::from(id),
            name: format!("zone-{id}"),
            shape: RegionShape::Circle { center, radius },
            color: None,
        }
    }

    fn sample(lat: f64, lng: f64) -> LocationSample {
        LocationSample::new(lat, lng)
    }

    // Center and a point well outside a 500 m radius around it
    const CENTER: (f64, f64) = (40.7128, -74.0060);
    const OUTSIDE: (f64, f64) = (40.73, -74.0060);

    #[test]
    fn test_edge_triggered_sequence() {
        let regions = vec![circle_region("r1", Point::new(CENTER.0, CENTER.1), 500.0)];
        let mut detector = TransitionDetector::new();

        // inside, inside, outside, inside -> Enter, (nothing), Exit, Enter
        let events = detector.evaluate(&sample(CENTER.0, CENTER.1), &regions);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Enter);

        let events = detector.evaluate(&sample(CENTER.0, CENTER.1), &regions);
        assert!(events.is_empty());

        let events = detector.evaluate(&sample(OUTSIDE.0, OUTSIDE.1), &regions);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Exit);

        let events = detector.evaluate(&sample(CENTER.0, CENTER.1), &regions);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Enter);
    }

    #[test]
    fn test_initial_outside_sample_emits_nothing() {
        let regions = vec![circle_region("r1", Point::new(CENTER.0, CENTER.1), 500.0)];
        let mut detector = TransitionDetector::new();

        let events = detector.evaluate(&sample(OUTSIDE.0, OUTSIDE.1), &regions);
        assert!(events.is_empty());
        assert_eq!(detector.occupied_count(), 0);
    }

    #[test]
    fn test_deleted_region_produces_no_exit() {
        let regions = vec![circle_region("r1", Point::new(CENTER.0, CENTER.1), 500.0)];
        let mut detector = TransitionDetector::new();

        let events = detector.evaluate(&sample(CENTER.0, CENTER.1), &regions);
        assert_eq!(events.len(), 1);
        assert!(detector.is_inside(&RegionId::from("r1")));

        // Region deleted while the point is inside it: membership is
        // dropped silently, no Exit is synthesized
        let events = detector.evaluate(&sample(CENTER.0, CENTER.1), &[]);
        assert!(events.is_empty());
        assert!(!detector.is_inside(&RegionId::from("r1")));
        assert_eq!(detector.occupied_count(), 0);
    }

    #[test]
    fn test_events_follow_region_order() {
        let regions = vec![
            circle_region("a", Point::new(CENTER.0, CENTER.1), 500.0),
            circle_region("b", Point::new(CENTER.0, CENTER.1), 800.0),
        ];
        let mut detector = TransitionDetector::new();

        let events = detector.evaluate(&sample(CENTER.0, CENTER.1), &regions);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].region.id, RegionId::from("a"));
        assert_eq!(events[1].region.id, RegionId::from("b"));
        assert_eq!(detector.occupied_count(), 2);
    }

    #[test]
    fn test_overlapping_regions_transition_independently() {
        // Small and large circle around the same center: stepping to a
        // mid-distance point exits only the small one
        let regions = vec![
            circle_region("small", Point::new(CENTER.0, CENTER.1), 500.0),
            circle_region("large", Point::new(CENTER.0, CENTER.1), 5_000.0),
        ];
        let mut detector = TransitionDetector::new();

        detector.evaluate(&sample(CENTER.0, CENTER.1), &regions);
        let events = detector.evaluate(&sample(OUTSIDE.0, OUTSIDE.1), &regions);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Exit);
        assert_eq!(events[0].region.id, RegionId::from("small"));
        assert!(detector.is_inside(&RegionId::from("large")));
    }

    #[test]
    fn test_malformed_region_is_always_outside() {
        let regions = vec![
            circle_region("bad", Point::new(CENTER.0, CENTER.1), -1.0),
            circle_region("good", Point::new(CENTER.0, CENTER.1), 500.0),
        ];
        let mut detector = TransitionDetector::new();

        let events = detector.evaluate(&sample(CENTER.0, CENTER.1), &regions);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].region.id, RegionId::from("good"));
        assert!(!detector.is_inside(&RegionId::from("bad")));
    }

    #[test]
    fn test_event_carries_sample_location_and_time() {
        let regions = vec![circle_region("r1", Point::new(CENTER.0, CENTER.1), 500.0)];
        let mut detector = TransitionDetector::new();

        let mut s = sample(CENTER.0, CENTER.1);
        s.accuracy = Some(12.0);
        let events = detector.evaluate(&s, &regions);

        assert_eq!(events[0].location, s.point());
        assert_eq!(events[0].accuracy, Some(12.0));
        assert_eq!(events[0].timestamp, s.timestamp);
        assert_eq!(events[0].region.name, "zone-r1");
    }
}
