//! Event sink - consumer interface for transition events
//!
//! The monitor always holds a sink; running without a consumer is a
//! configuration choice (`NullSink`), never a nullable callback. Delivery
//! is synchronous with the evaluation that produced the event.

use crate::domain::types::GeofenceEvent;
use tracing::info;

/// Consumer of transition events
pub trait EventSink: Send {
    fn deliver(&self, event: &GeofenceEvent);
}

/// Logs each event as a structured tracing record
pub struct LogSink;

impl EventSink for LogSink {
    fn deliver(&self, event: &GeofenceEvent) {
        info!(
            kind = %event.kind.as_str(),
            region_id = %event.region.id,
            region = %event.region.name,
            lat = %event.location.lat,
            lng = %event.location.lng,
            "zone_transition"
        );
    }
}

/// Discards events; explicit stand-in when no consumer is configured
pub struct NullSink;

impl EventSink for NullSink {
    fn deliver(&self, _event: &GeofenceEvent) {}
}

/// Fans each event out to every wrapped sink, in order
pub struct CompositeSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl CompositeSink {
    pub fn new(sinks: Vec<Box<dyn EventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventSink for CompositeSink {
    fn deliver(&self, event: &GeofenceEvent) {
        for sink in &self.sinks {
            sink.deliver(event);
        }
    }
}
