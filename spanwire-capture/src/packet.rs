/// A captured frame borrowed from its capture source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedFrame<'a> {
    /// Captured bytes (at most the snapshot length).
    pub data: &'a [u8],
    /// Length of the frame on the wire, which can exceed `data.len()`.
    pub wire_len: u32,
}

impl<'a> CapturedFrame<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            wire_len: data.len() as u32,
        }
    }

    /// True when the snapshot length cut the frame short.
    pub fn is_truncated(&self) -> bool {
        (self.data.len() as u64) < u64::from(self.wire_len)
    }
}
