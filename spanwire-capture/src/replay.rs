//! In-memory frame source.
//!
//! Serves a fixed list of frames in order, then reports
//! [`CaptureError::Exhausted`]. Useful for dry runs and for driving the
//! pipeline without a capture device.

use std::collections::VecDeque;

use bytes::Bytes;

use crate::error::CaptureError;
use crate::packet::CapturedFrame;
use crate::FrameSource;

#[derive(Debug, Default, Clone)]
pub struct ReplaySource {
    pending: VecDeque<Bytes>,
    current: Option<Bytes>,
    /// Number of timeouts to report before each frame.
    idle_ticks: usize,
    idle_left: usize,
}

impl ReplaySource {
    pub fn new<I, B>(frames: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self {
            pending: frames.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Reports `ticks` read timeouts (`Ok(None)`) ahead of every frame.
    pub fn with_idle_ticks(mut self, ticks: usize) -> Self {
        self.idle_ticks = ticks;
        self.idle_left = ticks;
        self
    }

    pub fn push(&mut self, frame: impl Into<Bytes>) {
        self.pending.push_back(frame.into());
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<CapturedFrame<'_>>, CaptureError> {
        if self.pending.is_empty() {
            self.current = None;
            return Err(CaptureError::Exhausted);
        }
        if self.idle_left > 0 {
            self.idle_left -= 1;
            return Ok(None);
        }
        self.idle_left = self.idle_ticks;
        self.current = self.pending.pop_front();
        Ok(self.current.as_deref().map(CapturedFrame::new))
    }
}
