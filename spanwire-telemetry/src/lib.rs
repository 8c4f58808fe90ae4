//! # Spanwire Telemetry
//!
//! Logging setup and pipeline counters.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
