//! Conversion from validated configuration to component settings.

use spanwire_capture::CaptureSettings;
use spanwire_config::CaptureConfig;

/// Builds capture settings from a validated [`CaptureConfig`].
///
/// Validation bounds both values well below `i32::MAX`.
pub fn capture_settings(config: &CaptureConfig) -> CaptureSettings {
    CaptureSettings {
        snaplen: config.snaplen as i32,
        promiscuous: config.promiscuous,
        timeout_ms: config.timeout_ms as i32,
    }
}
