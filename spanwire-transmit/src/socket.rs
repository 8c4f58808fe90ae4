//! Link-layer packet socket bound to the egress interface.
//!
//! The socket is `SOCK_DGRAM` on `AF_PACKET`: the kernel writes the Ethernet
//! header with ethertype 0x88BE and the frame body is exactly the two
//! segments of an [`OutboundFrame`], sent with a single `sendmsg`.

use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use spanwire_protocols::{OutboundFrame, ETHERTYPE_ERSPAN};
use tracing::{debug, error, info};

use crate::error::TransmitError;
use crate::interface::resolve_interface_index;
use crate::FrameSink;

/// Address family, protocol and interface index a transmitter sends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationBinding {
    ifindex: u32,
    protocol: u16,
}

impl DestinationBinding {
    pub fn new(ifindex: u32, protocol: u16) -> Self {
        Self { ifindex, protocol }
    }

    pub fn ifindex(&self) -> u32 {
        self.ifindex
    }

    /// Ethertype in host byte order.
    pub fn protocol(&self) -> u16 {
        self.protocol
    }

    fn sockaddr(&self) -> libc::sockaddr_ll {
        let mut addr: libc::sockaddr_ll = unsafe { mem::zeroed() };
        addr.sll_family = libc::AF_PACKET as libc::c_ushort;
        addr.sll_protocol = self.protocol.to_be();
        addr.sll_ifindex = self.ifindex as libc::c_int;
        // all-zero destination hardware address
        addr.sll_halen = 6;
        addr
    }
}

/// Sends frames through an `AF_PACKET` socket.
///
/// Lifecycle: `open` yields a bound transmitter; the first send failure
/// releases the socket and every later send returns
/// [`TransmitError::Closed`]. Dropping the transmitter closes the socket.
#[derive(Debug)]
pub struct RawTransmitter {
    fd: Option<OwnedFd>,
    binding: DestinationBinding,
}

impl RawTransmitter {
    /// Resolves `egress` and binds a packet socket to it.
    ///
    /// Name and lookup failures happen before a socket is created.
    pub fn open(egress: &str) -> Result<Self, TransmitError> {
        let ifindex = resolve_interface_index(egress)?;
        let binding = DestinationBinding::new(ifindex, ETHERTYPE_ERSPAN);

        let raw = unsafe {
            libc::socket(
                libc::AF_PACKET,
                libc::SOCK_DGRAM | libc::SOCK_CLOEXEC,
                libc::c_int::from(ETHERTYPE_ERSPAN.to_be()),
            )
        };
        if raw == -1 {
            return Err(TransmitError::Socket(io::Error::last_os_error()));
        }
        // From here on the descriptor is closed on every exit path.
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        let addr = binding.sockaddr();
        let rc = unsafe {
            libc::bind(
                fd.as_raw_fd(),
                (&addr as *const libc::sockaddr_ll).cast::<libc::sockaddr>(),
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            )
        };
        if rc == -1 {
            return Err(TransmitError::Bind {
                ifindex,
                source: io::Error::last_os_error(),
            });
        }

        info!(
            interface = egress,
            ifindex,
            ethertype = ETHERTYPE_ERSPAN,
            "Packet socket bound"
        );

        Ok(Self {
            fd: Some(fd),
            binding,
        })
    }

    pub fn binding(&self) -> DestinationBinding {
        self.binding
    }

    pub fn is_open(&self) -> bool {
        self.fd.is_some()
    }
}

impl FrameSink for RawTransmitter {
    fn send(&mut self, frame: &OutboundFrame<'_>) -> Result<usize, TransmitError> {
        let fd = self.fd.as_ref().ok_or(TransmitError::Closed)?;

        let addr = self.binding.sockaddr();
        let slices = frame.io_slices();

        // IoSlice is ABI compatible with iovec on Unix.
        let mut msg: libc::msghdr = unsafe { mem::zeroed() };
        msg.msg_name = (&addr as *const libc::sockaddr_ll).cast_mut().cast();
        msg.msg_namelen = mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t;
        msg.msg_iov = slices.as_ptr().cast_mut().cast::<libc::iovec>();
        msg.msg_iovlen = slices.len() as _;

        let sent = unsafe { libc::sendmsg(fd.as_raw_fd(), &msg, 0) };
        if sent == -1 {
            let err = TransmitError::Send(io::Error::last_os_error());
            error!(
                ifindex = self.binding.ifindex,
                transient = err.is_transient(),
                "Send failed, closing packet socket: {}",
                err
            );
            self.fd = None;
            return Err(err);
        }

        debug!(bytes = sent, ifindex = self.binding.ifindex, "Frame sent");
        Ok(sent as usize)
    }
}
