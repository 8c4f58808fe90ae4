//! Live capture parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Capture session configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Snapshot length in bytes.
    #[validate(range(min = 64, max = 262144))]
    #[serde(default = "default_snaplen")]
    pub snaplen: u32,

    /// Run in promiscuous mode?
    #[serde(default = "default_promiscuous")]
    pub promiscuous: bool,

    /// Read timeout (milliseconds). Also bounds how long a stop request waits.
    #[validate(range(min = 1, max = 60000))]
    #[serde(default = "default_timeout")]
    pub timeout_ms: u32,
}

fn default_snaplen() -> u32 {
    4096
}

fn default_promiscuous() -> bool {
    true
}

fn default_timeout() -> u32 {
    1000
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: default_snaplen(),
            promiscuous: default_promiscuous(),
            timeout_ms: default_timeout(),
        }
    }
}
