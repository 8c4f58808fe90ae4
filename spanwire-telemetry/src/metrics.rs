//! ## spanwire-telemetry::metrics
//! Prometheus counters for the mirror pipeline.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub frames_sent: IntCounter,
    pub bytes_sent: IntCounter,
    pub capture_timeouts: IntCounter,
    pub send_errors: IntCounter,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let frames_sent = IntCounter::new("spanwire_frames_total", "Mirrored frames sent")?;
        let bytes_sent = IntCounter::new(
            "spanwire_bytes_total",
            "Bytes sent including ERSPAN headers",
        )?;
        let capture_timeouts = IntCounter::new(
            "spanwire_capture_timeouts_total",
            "Capture reads that timed out without a frame",
        )?;
        let send_errors =
            IntCounter::new("spanwire_send_errors_total", "Failed frame transmissions")?;

        registry.register(Box::new(frames_sent.clone()))?;
        registry.register(Box::new(bytes_sent.clone()))?;
        registry.register(Box::new(capture_timeouts.clone()))?;
        registry.register(Box::new(send_errors.clone()))?;

        Ok(Self {
            registry,
            frames_sent,
            bytes_sent,
            capture_timeouts,
            send_errors,
        })
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn record_sent(&self, bytes: usize) {
        self.frames_sent.inc();
        self.bytes_sent.inc_by(bytes as u64);
    }
}
