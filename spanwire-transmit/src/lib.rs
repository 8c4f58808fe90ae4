//! # Spanwire Transmit
//!
//! Sends composed ERSPAN frames out an egress interface through a Linux
//! `AF_PACKET` socket bound to the interface index.

pub mod error;
pub mod interface;
pub mod socket;

pub use error::TransmitError;
pub use interface::resolve_interface_index;
pub use socket::{DestinationBinding, RawTransmitter};

use spanwire_protocols::OutboundFrame;

/// Destination for composed frames.
pub trait FrameSink {
    /// Sends one frame, returning the number of bytes accepted.
    fn send(&mut self, frame: &OutboundFrame<'_>) -> Result<usize, TransmitError>;
}
