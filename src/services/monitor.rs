//! Sample processing loop
//!
//! The Monitor is the single consumer of the location sample channel. Per
//! sample it takes one consistent snapshot of the region store, runs the
//! transition detector against it, and delivers resulting events to the
//! sink. Running all evaluations on one loop serializes access to the
//! detector's membership state.

use crate::domain::types::LocationSample;
use crate::infra::metrics::Metrics;
use crate::io::sink::EventSink;
use crate::services::detector::TransitionDetector;
use crate::services::region_store::RegionStore;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::debug;

/// Central processor for location samples
pub struct Monitor {
    detector: TransitionDetector,
    store: Arc<RwLock<RegionStore>>,
    sink: Box<dyn EventSink>,
    metrics: Arc<Metrics>,
}

impl Monitor {
    pub fn new(
        store: Arc<RwLock<RegionStore>>,
        sink: Box<dyn EventSink>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { detector: TransitionDetector::new(), store, sink, metrics }
    }

    /// Consume samples until the channel closes
    pub async fn run(&mut self, mut sample_rx: mpsc::Receiver<LocationSample>) {
        while let Some(sample) = sample_rx.recv().await {
            self.process_sample(&sample);
        }
    }

    /// Evaluate one sample against a snapshot of the region store
    pub fn process_sample(&mut self, sample: &LocationSample) {
        let process_start = Instant::now();

        // Copy-on-read snapshot: create/delete racing this evaluation see
        // either the old or the new region set, never a half-updated one
        let regions = self.store.read().list();
        let events = self.detector.evaluate(sample, &regions);

        for event in &events {
            self.sink.deliver(event);
            self.metrics.record_event(event.kind);
        }

        let latency_us = process_start.elapsed().as_micros() as u64;
        self.metrics.record_sample(latency_us);
        self.metrics.set_occupied(self.detector.occupied_count());
        self.metrics.set_region_count(regions.len());

        debug!(
            lat = %sample.lat,
            lng = %sample.lng,
            regions = %regions.len(),
            events = %events.len(),
            occupied = %self.detector.occupied_count(),
            "sample_evaluated"
        );
    }

    /// Number of regions currently occupied by the tracked point
    pub fn occupied_count(&self) -> usize {
        self.detector.occupied_count()
    }
}
