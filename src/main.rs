//! Geofence Notify - zone transition tracking daemon
//!
//! Replays (or receives) location samples, evaluates them against the
//! persisted region set, and emits edge-triggered Enter/Exit events.
//!
//! Module structure:
//! - `domain/` - Core types (Point, Region, GeofenceEvent)
//! - `io/` - External interfaces (storage, provider, sinks, egress)
//! - `services/` - Business logic (geometry, detector, store, monitor)
//! - `infra/` - Infrastructure (Config, Metrics)

use clap::Parser;
use geofence_notify::infra::{Config, Metrics};
use geofence_notify::io::{CompositeSink, EventEgress, EventSink, LogSink, RegionStorage, ReplayProvider};
use geofence_notify::services::{Monitor, RegionStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Geofence Notify - zone entry/exit tracking daemon
#[derive(Parser, Debug)]
#[command(name = "geofence-notify", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for per-sample visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(git = %env!("GIT_HASH"), "geofence-notify starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        site = %config.site_id(),
        regions_file = %config.regions_file(),
        samples_file = %config.samples_file(),
        sample_interval_ms = %config.sample_interval_ms(),
        egress_enabled = %config.egress_enabled(),
        metrics_interval_secs = %config.metrics_interval_secs(),
        "config_loaded"
    );

    // Load persisted regions; absent or corrupt storage degrades to empty
    let storage = RegionStorage::new(config.regions_file());
    let store = Arc::new(RwLock::new(RegionStore::from_regions(storage.load())));
    let metrics = Arc::new(Metrics::new());

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Event sinks: always log; append to the JSONL egress when enabled
    let mut sinks: Vec<Box<dyn EventSink>> = vec![Box::new(LogSink)];
    if config.egress_enabled() {
        sinks.push(Box::new(EventEgress::new(config.egress_file())));
    }
    let sink = Box::new(CompositeSink::new(sinks));

    // Sample channel (bounded for backpressure); the monitor is the single
    // consumer, serializing every evaluation
    let (sample_tx, sample_rx) = mpsc::channel(1000);

    // Start the location provider
    let provider = ReplayProvider::new(config.samples_file(), config.sample_interval_ms());
    tokio::spawn(async move {
        provider.run(sample_tx, shutdown_rx).await;
    });

    // Start the metrics reporter
    let metrics_clone = metrics.clone();
    let metrics_interval = config.metrics_interval_secs();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(metrics_interval));
        loop {
            interval.tick().await;
            metrics_clone.report().log();
        }
    });

    // Handle shutdown on Ctrl+C
    let shutdown_signal = shutdown_tx;
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_signal.send(true);
    });

    // Run monitor - consumes samples until the provider closes the channel
    let mut monitor = Monitor::new(store, sink, metrics);
    info!("monitor_started");
    monitor.run(sample_rx).await;

    info!("geofence-notify shutdown complete");
    Ok(())
}
