//! ## spanwire-protocols::erspan
//! ERSPAN Type II header encoding and zero-copy frame composition.
//!
//! The header is built with explicit big-endian conversions over a fixed
//! 8-byte buffer:
//!
//! | Offset | Size | Field          |
//! |--------|------|----------------|
//! | 0      | 2    | `ver_vlan`     |
//! | 2      | 2    | `flags_spanid` |
//! | 4      | 4    | reserved (0)   |
//!
//! The mirrored frame follows the header verbatim. Nothing here allocates or
//! copies payload bytes.

use std::io::IoSlice;

use thiserror::Error;

/// Ethertype of ERSPAN Type II frames.
pub const ETHERTYPE_ERSPAN: u16 = 0x88BE;

/// Size of the encoded ERSPAN Type II header.
pub const ERSPAN_HEADER_LEN: usize = 8;

/// Version marker carried in `ver_vlan` (version field = 1, i.e. Type II).
pub const ERSPAN_VER2: u16 = 1 << 12;

/// "Truncated" flag in `flags_spanid`. Never set by [`encode_header`].
pub const ERSPAN_TRUNCATED: u16 = 1 << 10;

/// SPAN session identifier stamped on every mirrored frame.
pub const DEFAULT_SPAN_ID: u16 = 100;

/// VLAN identifier stamped on every mirrored frame.
pub const DEFAULT_VLAN_ID: u16 = 1;

const VLAN_MASK: u16 = 0x0FFF;
const SPAN_ID_MASK: u16 = 0x03FF;
const VERSION_SHIFT: u16 = 12;

/// Errors that can occur while decoding an ERSPAN header.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErspanParseError {
    #[error("Insufficient data for ERSPAN header: {0} bytes")]
    InsufficientData(usize),
    #[error("Unsupported ERSPAN version field: {0}")]
    UnsupportedVersion(u8),
}

/// Encodes an ERSPAN Type II header.
///
/// `vlan_id` is masked to 12 bits and `span_id` is written as-is, so
/// out-of-range values wrap instead of failing: VLAN 4096 encodes as VLAN 0.
pub fn encode_header(vlan_id: u16, span_id: u16) -> [u8; ERSPAN_HEADER_LEN] {
    let ver_vlan = (vlan_id & VLAN_MASK) | ERSPAN_VER2;
    let flags_spanid = span_id;

    let mut header = [0u8; ERSPAN_HEADER_LEN];
    header[0..2].copy_from_slice(&ver_vlan.to_be_bytes());
    header[2..4].copy_from_slice(&flags_spanid.to_be_bytes());
    // bytes 4..8 stay zero (reserved)
    header
}

/// A decoded ERSPAN header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErspanHeader {
    /// ERSPAN version (2 for Type II).
    pub version: u8,
    pub vlan_id: u16,
    /// Low 10 bits of `flags_spanid`.
    pub span_id: u16,
    pub truncated: bool,
}

impl ErspanHeader {
    /// Decodes the first [`ERSPAN_HEADER_LEN`] bytes of `data`.
    pub fn decode(data: &[u8]) -> Result<Self, ErspanParseError> {
        if data.len() < ERSPAN_HEADER_LEN {
            return Err(ErspanParseError::InsufficientData(data.len()));
        }
        let ver_vlan = u16::from_be_bytes([data[0], data[1]]);
        let flags_spanid = u16::from_be_bytes([data[2], data[3]]);

        let version_field = (ver_vlan >> VERSION_SHIFT) as u8;
        if version_field != 1 {
            return Err(ErspanParseError::UnsupportedVersion(version_field));
        }

        Ok(Self {
            version: 2,
            vlan_id: ver_vlan & VLAN_MASK,
            span_id: flags_spanid & SPAN_ID_MASK,
            truncated: flags_spanid & ERSPAN_TRUNCATED != 0,
        })
    }

    /// Re-encodes this header. The truncated flag is not carried over.
    pub fn encode(&self) -> [u8; ERSPAN_HEADER_LEN] {
        encode_header(self.vlan_id, self.span_id)
    }
}

/// An outbound frame made of two segments: the encoded header and the
/// borrowed captured payload.
#[derive(Debug, Clone, Copy)]
pub struct OutboundFrame<'a> {
    header: [u8; ERSPAN_HEADER_LEN],
    payload: &'a [u8],
}

impl<'a> OutboundFrame<'a> {
    pub fn header(&self) -> &[u8; ERSPAN_HEADER_LEN] {
        &self.header
    }

    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Total number of bytes on the wire (header + payload).
    pub fn wire_len(&self) -> usize {
        ERSPAN_HEADER_LEN + self.payload.len()
    }

    /// Scatter-gather view for a single vectored send.
    pub fn io_slices(&self) -> [IoSlice<'_>; 2] {
        [IoSlice::new(&self.header), IoSlice::new(self.payload)]
    }

    /// Flattens both segments into one buffer. Diagnostics only.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.wire_len());
        buf.extend_from_slice(&self.header);
        buf.extend_from_slice(self.payload);
        buf
    }

    /// Hex-encoded header, for structured log fields.
    pub fn header_hex(&self) -> String {
        hex::encode(self.header)
    }
}

/// Pairs an encoded header with a captured payload. The payload is borrowed,
/// never copied, and its length is carried unmodified.
pub fn compose(header: [u8; ERSPAN_HEADER_LEN], payload: &[u8]) -> OutboundFrame<'_> {
    OutboundFrame { header, payload }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_session_header_bytes() {
        let header = encode_header(DEFAULT_VLAN_ID, DEFAULT_SPAN_ID);
        assert_eq!(header, [0x10, 0x01, 0x00, 0x64, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_vlan_out_of_range_is_masked() {
        let header = encode_header(4096, 7);
        let decoded = ErspanHeader::decode(&header).unwrap();
        assert_eq!(decoded.vlan_id, 0);
        assert_eq!(decoded.span_id, 7);
        assert_eq!(decoded.version, 2);
    }

    #[test]
    fn test_span_id_written_raw() {
        let header = encode_header(0, 0xFFFF);
        assert_eq!(&header[2..4], &[0xFF, 0xFF]);
        assert!(ErspanHeader::decode(&header).unwrap().truncated);
    }

    #[test]
    fn test_truncated_flag_never_set_in_range() {
        let header = encode_header(4095, 1023);
        assert!(!ErspanHeader::decode(&header).unwrap().truncated);
        assert_eq!(&header[4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(
            ErspanHeader::decode(&[0x10, 0x01, 0x00]),
            Err(ErspanParseError::InsufficientData(3))
        );
    }

    #[test]
    fn test_decode_rejects_other_versions() {
        // version field 2 (Type III)
        let data = [0x20, 0x01, 0x00, 0x64, 0, 0, 0, 0];
        assert_eq!(
            ErspanHeader::decode(&data),
            Err(ErspanParseError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn test_compose_ethernet_frame() {
        let mut frame = vec![0u8; 60];
        frame[..6].copy_from_slice(&[0xff; 6]);
        frame[12..14].copy_from_slice(&0x0800u16.to_be_bytes());

        let header = encode_header(1, 100);
        let outbound = compose(header, &frame);

        assert_eq!(outbound.wire_len(), 68);
        let flat = outbound.to_vec();
        assert_eq!(&flat[..8], &header);
        assert_eq!(&flat[8..], frame.as_slice());
        assert_eq!(outbound.header_hex(), "1001006400000000");
    }

    #[test]
    fn test_compose_borrows_payload() {
        let frame = bytes::Bytes::from_static(b"\x01\x02\x03");
        let outbound = compose(encode_header(1, 1), &frame);
        assert_eq!(outbound.payload().as_ptr(), frame.as_ptr());

        let slices = outbound.io_slices();
        assert_eq!(slices[0].len(), ERSPAN_HEADER_LEN);
        assert_eq!(&*slices[1], &frame[..]);
    }

    #[test]
    fn test_compose_empty_payload() {
        let outbound = compose(encode_header(1, 1), &[]);
        assert_eq!(outbound.wire_len(), ERSPAN_HEADER_LEN);
    }

    proptest! {
        #[test]
        fn header_round_trip(vlan in 0u16..=4095, span in 0u16..=1023) {
            let decoded = ErspanHeader::decode(&encode_header(vlan, span)).unwrap();
            prop_assert_eq!(decoded.vlan_id, vlan);
            prop_assert_eq!(decoded.span_id, span);
            prop_assert_eq!(decoded.version, 2);
            prop_assert!(!decoded.truncated);
        }

        #[test]
        fn composed_frame_is_header_then_payload(
            payload in proptest::collection::vec(any::<u8>(), 0..1600),
            vlan in any::<u16>(),
            span in any::<u16>(),
        ) {
            let header = encode_header(vlan, span);
            let flat = compose(header, &payload).to_vec();
            prop_assert_eq!(flat.len(), 8 + payload.len());
            prop_assert_eq!(&flat[..8], &header[..]);
            prop_assert_eq!(&flat[8..], payload.as_slice());
        }
    }
}
