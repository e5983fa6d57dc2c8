use kproto_wire::Message;
use tracing::warn;

use crate::error::Result;
use crate::traits::FrameTransport;

/// Completion hook invoked after the final frame of a message is accepted.
pub type CompletionHook = Box<dyn FnMut() + Send>;

/// Pushes a message's frames onto the transport in order, marking all but
/// the last frame as "more data follows".
///
/// Frames are never reordered or dropped. If the transport rejects a frame
/// the remaining frames of that message are not sent, the error is
/// surfaced, and the completion hook does not run; "all frames sent" and
/// "some frames sent, then failure" are distinguishable via the result.
pub struct MessageSender<T> {
    inner: T,
    on_done: Option<CompletionHook>,
}

impl<T: FrameTransport> MessageSender<T> {
    /// Create a sender over the given transport.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            on_done: None,
        }
    }

    /// Create a sender with a completion hook, invoked once per fully
    /// transmitted message.
    pub fn with_completion_hook(inner: T, on_done: impl FnMut() + Send + 'static) -> Self {
        Self {
            inner,
            on_done: Some(Box::new(on_done)),
        }
    }

    /// Send every frame of the message, in order.
    pub fn send(&mut self, message: &Message) -> Result<()> {
        let frames = message.frames();
        let total = frames.len();
        for (index, frame) in frames.iter().enumerate() {
            let more = index + 1 < total;
            if let Err(err) = self.inner.send_part(frame, more) {
                warn!(index, total, %err, "transport rejected frame mid-send");
                return Err(err);
            }
        }
        if let Some(hook) = self.on_done.as_mut() {
            hook();
        }
        Ok(())
    }

    /// Borrow the underlying transport.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying transport.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the sender and return the transport.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
