use std::collections::VecDeque;

use bytes::Bytes;

use crate::error::{Result, TransportError};
use crate::traits::FrameTransport;

/// In-process transport that records parts in order.
///
/// Parts accumulate with their "more follows" marker; [`take_message`]
/// regroups them into whole messages at the markers, so frame boundaries
/// and message grouping survive exactly.
///
/// [`take_message`]: MemoryTransport::take_message
#[derive(Debug, Default)]
pub struct MemoryTransport {
    parts: VecDeque<(Bytes, bool)>,
    closed: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse all further parts, as a closed socket would.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// All recorded parts with their markers, oldest first.
    pub fn parts(&self) -> Vec<(Bytes, bool)> {
        self.parts.iter().cloned().collect()
    }

    /// Pop the oldest complete message: every part up to and including the
    /// first one marked final. Returns `None` if no final marker has been
    /// recorded yet.
    pub fn take_message(&mut self) -> Option<Vec<Bytes>> {
        let end = self.parts.iter().position(|(_, more)| !more)?;
        Some(
            self.parts
                .drain(..=end)
                .map(|(payload, _)| payload)
                .collect(),
        )
    }
}

impl FrameTransport for MemoryTransport {
    fn send_part(&mut self, part: &[u8], more: bool) -> Result<()> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.parts.push_back((Bytes::copy_from_slice(part), more));
        Ok(())
    }
}
