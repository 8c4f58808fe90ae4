/*!
# Runtime

Live wiring of the mirror pipeline: binds the egress socket, opens the
capture session and runs the loop until stopped or until a fatal error.

Both resources are owned by the [`Mirror`] built here and are released when
this function returns, on success and on every error path.
*/

use std::sync::atomic::AtomicBool;

use opentelemetry::KeyValue;
use tracing::{info, instrument};

use spanwire_capture::LiveCapture;
use spanwire_config::MirrorConfig;
use spanwire_telemetry::{EventLogger, MetricsRecorder};
use spanwire_transmit::RawTransmitter;

use crate::config::capture_settings;
use crate::engine::{Mirror, MirrorStats, PipelineError};

/// Mirrors traffic from `capture` to `egress` as ERSPAN Type II frames.
///
/// The egress socket is bound before the capture session opens, so interface
/// name and lookup errors surface without touching the capture device.
/// `limit` bounds the number of frames sent; `None` runs until `stop`.
#[instrument(level = "info", name = "run_live", skip(config, metrics, stop))]
pub fn run_live(
    egress: &str,
    capture: &str,
    config: &MirrorConfig,
    metrics: MetricsRecorder,
    stop: &AtomicBool,
    limit: Option<u64>,
) -> Result<MirrorStats, PipelineError> {
    let transmitter = RawTransmitter::open(egress)?;
    let binding = transmitter.binding();
    let source = LiveCapture::open(capture, &capture_settings(&config.capture))?;

    EventLogger::log_event(
        "mirror_started",
        &[
            KeyValue::new("egress", egress.to_owned()),
            KeyValue::new("egress_ifindex", i64::from(binding.ifindex())),
            KeyValue::new("ethertype", format!("{:#06x}", binding.protocol())),
            KeyValue::new("capture", source.interface().to_owned()),
        ],
    );

    let mut mirror =
        Mirror::new(source, transmitter, metrics).with_hexdump(config.telemetry.hexdump);

    let result = mirror.run(stop, limit);
    let stats = mirror.stats();
    EventLogger::log_event(
        "mirror_stopped",
        &[
            KeyValue::new("frames", stats.frames as i64),
            KeyValue::new("bytes", stats.bytes as i64),
            KeyValue::new("clean", result.is_ok()),
        ],
    );
    info!(frames = stats.frames, bytes = stats.bytes, "Mirror stopped");

    result
}
