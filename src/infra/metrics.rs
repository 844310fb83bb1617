//! Lock-free metrics collection and periodic reporting
//!
//! Uses atomics for hot-path operations to avoid mutex contention.
//! All counter updates are lock-free; reporting is the only operation
//! that needs synchronization (via atomic swap).
//!
//! NOTE: All atomics use Relaxed ordering intentionally. These are
//! statistical counters only; do not use them for coordination or logic
//! decisions.

use crate::domain::types::EventKind;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::info;

/// Exponential bucket boundaries for evaluation latency (microseconds)
/// Buckets: ≤10, ≤20, ≤40, ≤80, ≤160, ≤320, ≤640, ≤1280, ≤2560, ≤5120, >5120
const BUCKET_BOUNDS: [u64; 10] = [10, 20, 40, 80, 160, 320, 640, 1280, 2560, 5120];
const NUM_BUCKETS: usize = 11;

/// Upper bound per bucket for percentile estimation (last is 2x the previous bound)
const BUCKET_UPPER_BOUNDS: [u64; NUM_BUCKETS] =
    [10, 20, 40, 80, 160, 320, 640, 1280, 2560, 5120, 10240];

/// Compute bucket index for a latency value using binary search
#[inline]
fn bucket_index(latency_us: u64) -> usize {
    BUCKET_BOUNDS.partition_point(|&bound| bound < latency_us)
}

/// Update an atomic max value using compare-and-swap loop
#[inline]
fn update_atomic_max(atomic_max: &AtomicU64, new_value: u64) {
    let mut current_max = atomic_max.load(Ordering::Relaxed);
    while new_value > current_max {
        match atomic_max.compare_exchange_weak(
            current_max,
            new_value,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(actual) => current_max = actual,
        }
    }
}

/// Swap all buckets to zero and return their values
#[inline]
fn swap_buckets(buckets: &[AtomicU64; NUM_BUCKETS]) -> [u64; NUM_BUCKETS] {
    let mut result = [0u64; NUM_BUCKETS];
    for (i, bucket) in buckets.iter().enumerate() {
        result[i] = bucket.swap(0, Ordering::Relaxed);
    }
    result
}

/// Compute percentile from histogram buckets
/// Returns the upper bound of the bucket containing the percentile
fn percentile_from_buckets(buckets: &[u64; NUM_BUCKETS], percentile: f64) -> u64 {
    let total: u64 = buckets.iter().sum();
    if total == 0 {
        return 0;
    }

    let target = (total as f64 * percentile) as u64;
    let mut cumulative = 0u64;

    for (i, &count) in buckets.iter().enumerate() {
        cumulative += count;
        if cumulative >= target {
            return BUCKET_UPPER_BOUNDS[i];
        }
    }
    BUCKET_UPPER_BOUNDS[NUM_BUCKETS - 1]
}

/// Lock-free metrics collector
///
/// All recording operations are lock-free using atomics.
/// The `report()` method atomically swaps interval counters to get a
/// consistent snapshot.
pub struct Metrics {
    /// Total samples ever evaluated (monotonic)
    samples_total: AtomicU64,
    /// Samples since last report (reset on report)
    samples_since_report: AtomicU64,
    /// Sum of evaluation latencies in microseconds (reset on report)
    latency_sum_us: AtomicU64,
    /// Max evaluation latency in microseconds (reset on report)
    latency_max_us: AtomicU64,
    /// Evaluation latency histogram buckets (reset on report)
    latency_buckets: [AtomicU64; NUM_BUCKETS],
    /// Total Enter events emitted (monotonic)
    enters_total: AtomicU64,
    /// Total Exit events emitted (monotonic)
    exits_total: AtomicU64,
    /// Regions currently occupied (gauge)
    occupied: AtomicUsize,
    /// Regions in the store at last evaluation (gauge)
    region_count: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            samples_total: AtomicU64::new(0),
            samples_since_report: AtomicU64::new(0),
            latency_sum_us: AtomicU64::new(0),
            latency_max_us: AtomicU64::new(0),
            latency_buckets: Default::default(),
            enters_total: AtomicU64::new(0),
            exits_total: AtomicU64::new(0),
            occupied: AtomicUsize::new(0),
            region_count: AtomicUsize::new(0),
        }
    }

    /// Record one evaluated sample and its latency
    pub fn record_sample(&self, latency_us: u64) {
        self.samples_total.fetch_add(1, Ordering::Relaxed);
        self.samples_since_report.fetch_add(1, Ordering::Relaxed);
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        update_atomic_max(&self.latency_max_us, latency_us);
        self.latency_buckets[bucket_index(latency_us)].fetch_add(1, Ordering::Relaxed);
    }

    /// Record one emitted transition event
    pub fn record_event(&self, kind: EventKind) {
        match kind {
            EventKind::Enter => self.enters_total.fetch_add(1, Ordering::Relaxed),
            EventKind::Exit => self.exits_total.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn set_occupied(&self, occupied: usize) {
        self.occupied.store(occupied, Ordering::Relaxed);
    }

    pub fn set_region_count(&self, count: usize) {
        self.region_count.store(count, Ordering::Relaxed);
    }

    /// Snapshot and reset interval counters
    pub fn report(&self) -> MetricsSummary {
        let samples_interval = self.samples_since_report.swap(0, Ordering::Relaxed);
        let latency_sum = self.latency_sum_us.swap(0, Ordering::Relaxed);
        let latency_max = self.latency_max_us.swap(0, Ordering::Relaxed);
        let buckets = swap_buckets(&self.latency_buckets);

        let latency_avg_us =
            if samples_interval > 0 { latency_sum / samples_interval } else { 0 };

        MetricsSummary {
            samples_total: self.samples_total.load(Ordering::Relaxed),
            samples_interval,
            latency_avg_us,
            latency_max_us: latency_max,
            latency_p50_us: percentile_from_buckets(&buckets, 0.50),
            latency_p99_us: percentile_from_buckets(&buckets, 0.99),
            enters_total: self.enters_total.load(Ordering::Relaxed),
            exits_total: self.exits_total.load(Ordering::Relaxed),
            occupied: self.occupied.load(Ordering::Relaxed),
            region_count: self.region_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time snapshot produced by `Metrics::report`
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub samples_total: u64,
    pub samples_interval: u64,
    pub latency_avg_us: u64,
    pub latency_max_us: u64,
    pub latency_p50_us: u64,
    pub latency_p99_us: u64,
    pub enters_total: u64,
    pub exits_total: u64,
    pub occupied: usize,
    pub region_count: usize,
}

impl MetricsSummary {
    pub fn log(&self) {
        info!(
            samples_total = %self.samples_total,
            samples_interval = %self.samples_interval,
            eval_avg_us = %self.latency_avg_us,
            eval_max_us = %self.latency_max_us,
            eval_p50_us = %self.latency_p50_us,
            eval_p99_us = %self.latency_p99_us,
            enters_total = %self.enters_total,
            exits_total = %self.exits_total,
            occupied = %self.occupied,
            regions = %self.region_count,
            "metrics_report"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_index() {
        assert_eq!(bucket_index(0), 0);
        assert_eq!(bucket_index(10), 0);
        assert_eq!(bucket_index(11), 1);
        assert_eq!(bucket_index(5120), 9);
        assert_eq!(bucket_index(99_999), 10);
    }

    #[test]
    fn test_record_and_report() {
        let metrics = Metrics::new();
        metrics.record_sample(15);
        metrics.record_sample(45);
        metrics.record_event(EventKind::Enter);
        metrics.record_event(EventKind::Enter);
        metrics.record_event(EventKind::Exit);
        metrics.set_occupied(1);
        metrics.set_region_count(3);

        let summary = metrics.report();
        assert_eq!(summary.samples_total, 2);
        assert_eq!(summary.samples_interval, 2);
        assert_eq!(summary.latency_avg_us, 30);
        assert_eq!(summary.latency_max_us, 45);
        assert_eq!(summary.enters_total, 2);
        assert_eq!(summary.exits_total, 1);
        assert_eq!(summary.occupied, 1);
        assert_eq!(summary.region_count, 3);
    }

    #[test]
    fn test_interval_counters_reset_on_report() {
        let metrics = Metrics::new();
        metrics.record_sample(100);
        metrics.report();

        let summary = metrics.report();
        assert_eq!(summary.samples_interval, 0);
        assert_eq!(summary.latency_max_us, 0);
        // Monotonic totals survive the reset
        assert_eq!(summary.samples_total, 1);
    }

    #[test]
    fn test_percentile_from_empty_buckets() {
        let buckets = [0u64; NUM_BUCKETS];
        assert_eq!(percentile_from_buckets(&buckets, 0.99), 0);
    }

    #[test]
    fn test_percentile_estimation() {
        let metrics = Metrics::new();
        // 99 fast samples, one slow
        for _ in 0..99 {
            metrics.record_sample(5);
        }
        metrics.record_sample(5_000);

        let summary = metrics.report();
        assert_eq!(summary.latency_p50_us, 10);
        assert_eq!(summary.latency_p99_us, 10);
        assert_eq!(summary.latency_max_us, 5_000);
    }
}
