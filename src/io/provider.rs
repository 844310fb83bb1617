//! Location provider - replays recorded position fixes
//!
//! The core consumes samples from whatever provider feeds the channel;
//! this one replays a JSONL file (one `LocationSample` per line) at a
//! fixed cadence, standing in for a live GPS/platform source. Start is
//! spawning `run`; stop is the shutdown watch signal, after which no
//! further samples are delivered.

use crate::domain::types::LocationSample;
use std::path::PathBuf;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

/// Replays location samples from a JSONL file into the sample channel
pub struct ReplayProvider {
    path: PathBuf,
    interval: Duration,
}

impl ReplayProvider {
    pub fn new(path: &str, interval_ms: u64) -> Self {
        Self { path: PathBuf::from(path), interval: Duration::from_millis(interval_ms) }
    }

    /// Feed samples until the file is exhausted or shutdown is signalled
    pub async fn run(self, tx: mpsc::Sender<LocationSample>, mut shutdown: watch::Receiver<bool>) {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "sample_file_read_failed");
                return;
            }
        };

        info!(
            path = %self.path.display(),
            interval_ms = %self.interval.as_millis(),
            "replay_provider_started"
        );

        let mut delivered = 0u64;
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let sample: LocationSample = match serde_json::from_str(line) {
                Ok(sample) => sample,
                Err(e) => {
                    warn!(line = %(lineno + 1), error = %e, "sample_parse_failed");
                    continue;
                }
            };

            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!(delivered = %delivered, "replay_provider_stopped");
                        return;
                    }
                }
                _ = sleep(self.interval) => {}
            }

            debug!(lat = %sample.lat, lng = %sample.lng, "sample_replayed");
            if tx.send(sample).await.is_err() {
                // Consumer gone; nothing left to feed
                return;
            }
            delivered += 1;
        }

        info!(delivered = %delivered, "replay_provider_finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_replays_all_samples() {
        let file = sample_file(&[
            r#"{"lat":40.7128,"lng":-74.0060}"#,
            r#"{"lat":40.7130,"lng":-74.0060,"accuracy":8.0}"#,
        ]);

        let provider = ReplayProvider::new(file.path().to_str().unwrap(), 1);
        let (tx, mut rx) = mpsc::channel(16);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        provider.run(tx, shutdown_rx).await;

        let first = rx.recv().await.unwrap();
        assert_eq!(first.lat, 40.7128);
        let second = rx.recv().await.unwrap();
        assert_eq!(second.accuracy, Some(8.0));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_skips_malformed_lines() {
        let file = sample_file(&[
            r#"{"lat":1.0,"lng":2.0}"#,
            "not json at all",
            "",
            r#"{"lat":3.0,"lng":4.0}"#,
        ]);

        let provider = ReplayProvider::new(file.path().to_str().unwrap(), 1);
        let (tx, mut rx) = mpsc::channel(16);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        provider.run(tx, shutdown_rx).await;

        assert_eq!(rx.recv().await.unwrap().lat, 1.0);
        assert_eq!(rx.recv().await.unwrap().lat, 3.0);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_delivers_nothing() {
        let provider = ReplayProvider::new("/nonexistent/samples.jsonl", 1);
        let (tx, mut rx) = mpsc::channel(16);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        provider.run(tx, shutdown_rx).await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_shutdown_stops_delivery() {
        let file = sample_file(&[
            r#"{"lat":1.0,"lng":2.0}"#,
            r#"{"lat":3.0,"lng":4.0}"#,
            r#"{"lat":5.0,"lng":6.0}"#,
        ]);

        // Long interval so the shutdown signal races ahead of delivery
        let provider = ReplayProvider::new(file.path().to_str().unwrap(), 5_000);
        let (tx, mut rx) = mpsc::channel(16);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        shutdown_tx.send(true).unwrap();
        provider.run(tx, shutdown_rx).await;

        assert!(rx.recv().await.is_none());
    }
}
