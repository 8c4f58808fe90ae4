//! Interface name to index resolution.

use std::ffi::CString;
use std::io;

use tracing::debug;

use crate::error::TransmitError;

/// Longest usable interface name, excluding the terminating NUL.
pub const MAX_INTERFACE_NAME_LEN: usize = libc::IFNAMSIZ - 1;

/// Resolves `name` to the kernel's interface index.
///
/// Names that do not fit `IFNAMSIZ` are rejected before any system call.
pub fn resolve_interface_index(name: &str) -> Result<u32, TransmitError> {
    if name.len() > MAX_INTERFACE_NAME_LEN {
        return Err(TransmitError::InterfaceNameTooLong {
            name: name.to_owned(),
            len: name.len(),
            max: MAX_INTERFACE_NAME_LEN,
        });
    }
    let c_name =
        CString::new(name).map_err(|_| TransmitError::InvalidInterfaceName(name.to_owned()))?;

    let ifindex = unsafe { libc::if_nametoindex(c_name.as_ptr()) };
    if ifindex == 0 {
        return Err(TransmitError::InterfaceLookup {
            name: name.to_owned(),
            source: io::Error::last_os_error(),
        });
    }

    debug!(interface = name, ifindex, "Resolved interface index");
    Ok(ifindex)
}
