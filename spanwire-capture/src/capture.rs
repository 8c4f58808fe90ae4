use pcap::{Active, Capture};
use tracing::{debug, info};

use crate::error::CaptureError;
use crate::packet::CapturedFrame;
use crate::FrameSource;

/// Parameters for opening a live capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Snapshot length in bytes.
    pub snaplen: i32,
    pub promiscuous: bool,
    /// Read timeout in milliseconds.
    pub timeout_ms: i32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            snaplen: 4096,
            promiscuous: true,
            timeout_ms: 1000,
        }
    }
}

/// A live pcap session on one interface. The handle is closed on drop.
pub struct LiveCapture {
    interface: String,
    cap: Capture<Active>,
}

impl LiveCapture {
    /// Opens `interface` for live capture.
    pub fn open(interface: &str, settings: &CaptureSettings) -> Result<Self, CaptureError> {
        let open_err = |source| CaptureError::Open {
            interface: interface.to_owned(),
            source,
        };

        let cap = Capture::from_device(interface)
            .map_err(open_err)?
            .promisc(settings.promiscuous)
            .snaplen(settings.snaplen)
            .timeout(settings.timeout_ms)
            .open()
            .map_err(open_err)?;

        info!(
            interface,
            snaplen = settings.snaplen,
            promiscuous = settings.promiscuous,
            timeout_ms = settings.timeout_ms,
            "Capturing on interface"
        );

        Ok(Self {
            interface: interface.to_owned(),
            cap,
        })
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }
}

impl FrameSource for LiveCapture {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame<'_>>, CaptureError> {
        match self.cap.next_packet() {
            Ok(packet) => {
                debug!(
                    caplen = packet.header.caplen,
                    len = packet.header.len,
                    "Captured frame"
                );
                Ok(Some(CapturedFrame {
                    data: packet.data,
                    wire_len: packet.header.len,
                }))
            }
            Err(e) => live_read_error(e),
        }
    }
}

/// A live session has no end of stream: only a timeout is benign, anything
/// else (including `NoMorePackets`) is a read failure.
fn live_read_error<'a>(err: pcap::Error) -> Result<Option<CapturedFrame<'a>>, CaptureError> {
    match err {
        // No frame in this timeout window.
        pcap::Error::TimeoutExpired => Ok(None),
        e => Err(CaptureError::Read(e)),
    }
}
