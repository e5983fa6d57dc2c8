use crate::error::Result;

/// The interface the core requires of an external frame transport.
///
/// Implementations must deliver parts as an ordered, atomically-grouped
/// sequence per message (no interleaving of two messages' parts) and must
/// preserve part boundaries exactly. The transport itself is out of scope
/// here; in-process wiring uses [`crate::MemoryTransport`].
pub trait FrameTransport {
    /// Hand one frame to the transport. `more` is true for every frame of
    /// a message except the last.
    fn send_part(&mut self, part: &[u8], more: bool) -> Result<()>;
}

impl<T: FrameTransport + ?Sized> FrameTransport for &mut T {
    fn send_part(&mut self, part: &[u8], more: bool) -> Result<()> {
        (**self).send_part(part, more)
    }
}
