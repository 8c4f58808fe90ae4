//! spanwire-capture
//!
//! Frame acquisition for the mirror pipeline. Live capture goes through
//! pcap; [`ReplaySource`] serves frames from memory.

pub mod capture;
pub mod error;
pub mod packet;
pub mod replay;

pub use capture::{CaptureSettings, LiveCapture};
pub use error::CaptureError;
pub use packet::CapturedFrame;
pub use replay::ReplaySource;

/// A source of captured frames.
///
/// The returned frame borrows from the source and is only valid until the
/// next call.
pub trait FrameSource {
    /// Blocks until a frame is available.
    ///
    /// `Ok(None)` means the read timeout elapsed without traffic.
    fn next_frame(&mut self) -> Result<Option<CapturedFrame<'_>>, CaptureError>;
}
