use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("Interface name is too long: '{name}' ({len} bytes, limit {max})")]
    InterfaceNameTooLong { name: String, len: usize, max: usize },

    #[error("Invalid interface name: {0:?}")]
    InvalidInterfaceName(String),

    #[error("Failed to resolve interface '{name}': {source}")]
    InterfaceLookup {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create packet socket: {0}")]
    Socket(#[source] io::Error),

    #[error("Failed to bind packet socket to interface index {ifindex}: {source}")]
    Bind {
        ifindex: u32,
        #[source]
        source: io::Error,
    },

    #[error("Failed to send frame: {0}")]
    Send(#[source] io::Error),

    #[error("Transmitter is closed after a previous send failure")]
    Closed,
}

impl TransmitError {
    /// Argument errors are detected before any system call.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            TransmitError::InterfaceNameTooLong { .. } | TransmitError::InvalidInterfaceName(_)
        )
    }

    pub fn is_control_plane_error(&self) -> bool {
        matches!(self, TransmitError::InterfaceLookup { .. })
    }

    /// A send failure the kernel would likely clear on its own. Still fatal.
    pub fn is_transient(&self) -> bool {
        match self {
            TransmitError::Send(e) => {
                e.kind() == io::ErrorKind::WouldBlock
                    || e.raw_os_error() == Some(libc::ENOBUFS)
                    || e.kind() == io::ErrorKind::Interrupted
            }
            _ => false,
        }
    }
}
