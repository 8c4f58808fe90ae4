//! Capture → encapsulate → transmit loop.
//!
//! One frame is in flight at a time: the captured frame is borrowed from the
//! source, wrapped with the pre-encoded ERSPAN header and handed to the sink
//! before the next capture call.

use std::sync::atomic::{AtomicBool, Ordering};

use spanwire_capture::{CaptureError, FrameSource};
use spanwire_protocols::{
    compose, encode_header, hexdump, DEFAULT_SPAN_ID, DEFAULT_VLAN_ID, ERSPAN_HEADER_LEN,
};
use spanwire_telemetry::MetricsRecorder;
use spanwire_transmit::FrameSink;
use tracing::{debug, error, info, trace};

use super::error::PipelineError;

/// Result of a single pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A frame was sent; carries the number of bytes accepted by the sink.
    Sent(usize),
    /// The capture read timed out without a frame.
    Idle,
}

/// Cumulative counters for one [`Mirror`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MirrorStats {
    pub frames: u64,
    pub bytes: u64,
    pub idle: u64,
}

pub struct Mirror<S, K> {
    source: S,
    sink: K,
    header: [u8; ERSPAN_HEADER_LEN],
    metrics: MetricsRecorder,
    hexdump: bool,
    stats: MirrorStats,
}

impl<S: FrameSource, K: FrameSink> Mirror<S, K> {
    /// Builds a pipeline stamping the default SPAN session (id 100, VLAN 1).
    pub fn new(source: S, sink: K, metrics: MetricsRecorder) -> Self {
        Self {
            source,
            sink,
            header: encode_header(DEFAULT_VLAN_ID, DEFAULT_SPAN_ID),
            metrics,
            hexdump: false,
            stats: MirrorStats::default(),
        }
    }

    /// Overrides the session identifiers. Out-of-range values are masked.
    pub fn with_session(mut self, vlan_id: u16, span_id: u16) -> Self {
        self.header = encode_header(vlan_id, span_id);
        self
    }

    /// Logs a hex dump of every outbound frame at debug level.
    pub fn with_hexdump(mut self, enabled: bool) -> Self {
        self.hexdump = enabled;
        self
    }

    pub fn header(&self) -> &[u8; ERSPAN_HEADER_LEN] {
        &self.header
    }

    pub fn stats(&self) -> MirrorStats {
        self.stats
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Moves at most one frame from the source to the sink.
    pub fn step(&mut self) -> Result<Step, PipelineError> {
        let Some(frame) = self.source.next_frame()? else {
            self.stats.idle += 1;
            self.metrics.capture_timeouts.inc();
            trace!("Capture timeout, no frame");
            return Ok(Step::Idle);
        };

        if frame.is_truncated() {
            debug!(
                caplen = frame.data.len(),
                wire_len = frame.wire_len,
                "Frame cut by snapshot length"
            );
        }

        let outbound = compose(self.header, frame.data);
        if self.hexdump {
            debug!("Outbound frame:\n{}", hexdump(&outbound.to_vec()));
        }

        let sent = match self.sink.send(&outbound) {
            Ok(sent) => sent,
            Err(e) => {
                self.metrics.send_errors.inc();
                return Err(e.into());
            }
        };

        debug!(
            payload_len = frame.data.len(),
            sent,
            header = %outbound.header_hex(),
            "Mirrored frame"
        );
        self.stats.frames += 1;
        self.stats.bytes += sent as u64;
        self.metrics.record_sent(sent);
        Ok(Step::Sent(sent))
    }

    /// Runs until `stop` is set, `limit` frames have been sent, the source
    /// is exhausted, or an error occurs. Errors are returned as-is.
    pub fn run(
        &mut self,
        stop: &AtomicBool,
        limit: Option<u64>,
    ) -> Result<MirrorStats, PipelineError> {
        loop {
            if stop.load(Ordering::SeqCst) {
                info!("Stop requested");
                break;
            }
            if limit.is_some_and(|limit| self.stats.frames >= limit) {
                info!(frames = self.stats.frames, "Frame limit reached");
                break;
            }
            match self.step() {
                Ok(_) => {}
                Err(PipelineError::Capture(CaptureError::Exhausted)) => {
                    info!("Capture source exhausted");
                    break;
                }
                Err(e) => {
                    error!(kind = e.kind(), "Pipeline failed: {}", e);
                    return Err(e);
                }
            }
        }
        Ok(self.stats)
    }
}
