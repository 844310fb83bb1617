//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `storage` - durable region persistence (single JSON document)
//! - `provider` - location sample source (JSONL replay)
//! - `sink` - event sink interface and basic sinks
//! - `egress` - transition event output to file (JSONL format)

pub mod egress;
pub mod provider;
pub mod sink;
pub mod storage;

// Re-export commonly used types
pub use egress::EventEgress;
pub use provider::ReplayProvider;
pub use sink::{CompositeSink, EventSink, LogSink, NullSink};
pub use storage::RegionStorage;
