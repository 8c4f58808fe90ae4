//! # Spanwire Configuration
//!
//! Typed, validated runtime settings for the mirror pipeline.
//!
//! Values come from built-in defaults, optionally overridden by a YAML file
//! passed on the command line. SPAN and VLAN identifiers are fixed and are
//! not part of this configuration.

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::Path;

use figment::{
    providers::{Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod capture;
mod error;
mod telemetry;
mod validation;

pub use capture::CaptureConfig;
pub use error::ConfigError;
pub use telemetry::TelemetryConfig;

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Capture session parameters.
    #[validate(nested)]
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Logging parameters.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl MirrorConfig {
    /// Load configuration.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `path`, if given. A missing file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Self::defaults();
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            figment = figment.merge(Yaml::file(path));
        }
        Self::extract(figment)
    }

    /// Load configuration from an inline YAML document layered over defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::extract(Self::defaults().merge(Yaml::string(yaml)))
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(MirrorConfig::default()))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
