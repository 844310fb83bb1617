//! Event egress - writes transition events to file
//!
//! Events are written in JSONL format (one JSON object per line)
//! to the file specified in config.

use crate::domain::types::GeofenceEvent;
use crate::io::sink::EventSink;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Egress writer for transition events
pub struct EventEgress {
    file_path: String,
}

impl EventEgress {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "event_egress_initialized");
        Self { file_path: file_path.to_string() }
    }

    /// Write an event to the egress file
    /// Returns true if successful, false otherwise
    pub fn write_event(&self, event: &GeofenceEvent) -> bool {
        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "event_encode_failed");
                return false;
            }
        };

        match self.append_line(&json) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    kind = %event.kind.as_str(),
                    region_id = %event.region.id,
                    error = %e,
                    "event_egress_failed"
                );
                false
            }
        }
    }

    /// Append a line to the egress file
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;
        debug!(file = %self.file_path, bytes = %line.len(), "egress_written");

        Ok(())
    }
}

impl EventSink for EventEgress {
    fn deliver(&self, event: &GeofenceEvent) {
        self.write_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::region::{Region, RegionShape};
    use crate::domain::types::{EventKind, LocationSample, Point, RegionId};
    use std::fs;
    use tempfile::tempdir;

    fn enter_event(region_id: &str) -> GeofenceEvent {
        let region = Region {
            id: RegionId::from(region_id),
            name: "Home".to_string(),
            shape: RegionShape::Circle { center: Point::new(40.7128, -74.0060), radius: 500.0 },
            color: None,
        };
        GeofenceEvent::new(EventKind::Enter, &region, &LocationSample::new(40.7128, -74.0060))
    }

    #[test]
    fn test_egress_new() {
        let egress = EventEgress::new("events.jsonl");
        assert_eq!(egress.file_path, "events.jsonl");
    }

    #[test]
    fn test_write_event() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("events.jsonl");
        let egress = EventEgress::new(file_path.to_str().unwrap());

        assert!(egress.write_event(&enter_event("r1")));

        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed["kind"], "enter");
        assert_eq!(parsed["region"]["id"], "r1");
        assert_eq!(parsed["region"]["type"], "circle");
        assert_eq!(parsed["location"]["lat"], 40.7128);
    }

    #[test]
    fn test_append_mode() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("events.jsonl");
        fs::write(&file_path, "{\"existing\":\"data\"}\n").unwrap();

        let egress = EventEgress::new(file_path.to_str().unwrap());
        egress.write_event(&enter_event("r1"));

        let content = fs::read_to_string(&file_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("existing"));
        assert!(lines[1].contains("r1"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("dir").join("events.jsonl");
        let egress = EventEgress::new(nested.to_str().unwrap());

        assert!(egress.write_event(&enter_event("r1")));
        assert!(nested.exists());
    }

    #[test]
    fn test_each_line_is_valid_json() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("events.jsonl");
        let egress = EventEgress::new(file_path.to_str().unwrap());

        for i in 0..3 {
            egress.write_event(&enter_event(&format!("r{i}")));
        }

        let content = fs::read_to_string(&file_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let _parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }
}
