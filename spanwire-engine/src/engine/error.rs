use spanwire_capture::CaptureError;
use spanwire_config::ConfigError;
use spanwire_transmit::TransmitError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Transmit(#[from] TransmitError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PipelineError {
    /// Failure category shown in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Transmit(e) if e.is_argument_error() => "ArgumentError",
            PipelineError::Transmit(e) if e.is_control_plane_error() => "ControlPlaneError",
            PipelineError::Transmit(_) => "TransmitError",
            PipelineError::Capture(_) => "CaptureError",
            PipelineError::Config(_) => "ConfigError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_transmit_error_class() {
        let err = PipelineError::from(TransmitError::InterfaceNameTooLong {
            name: "x".repeat(16),
            len: 16,
            max: 15,
        });
        assert_eq!(err.kind(), "ArgumentError");

        let err = PipelineError::from(TransmitError::InterfaceLookup {
            name: "nope0".into(),
            source: std::io::Error::from_raw_os_error(19),
        });
        assert_eq!(err.kind(), "ControlPlaneError");

        let err = PipelineError::from(TransmitError::Closed);
        assert_eq!(err.kind(), "TransmitError");

        let err = PipelineError::from(CaptureError::Exhausted);
        assert_eq!(err.kind(), "CaptureError");

        let err = PipelineError::from(ConfigError::FileNotFound("mirror.yaml".into()));
        assert_eq!(err.kind(), "ConfigError");
    }
}
