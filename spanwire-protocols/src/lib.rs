//! # Spanwire Protocols
//!
//! ERSPAN Type II encapsulation and a hex-dump helper for diagnostics.

pub mod erspan;
pub mod hexdump;

pub use erspan::{
    compose, encode_header, ErspanHeader, ErspanParseError, OutboundFrame, DEFAULT_SPAN_ID,
    DEFAULT_VLAN_ID, ERSPAN_HEADER_LEN, ETHERTYPE_ERSPAN,
};
pub use hexdump::hexdump;
