//! Transport seam and transmission adapter for kproto IPC.
//!
//! The underlying transport is an external collaborator: all the core asks
//! of it is the [`FrameTransport`] trait — accept one frame at a time with
//! a "more data follows" marker. [`MessageSender`] adapts a whole message
//! onto that seam. [`MemoryTransport`] is the in-process implementation
//! used by tests and same-process wiring.

pub mod error;
pub mod memory;
pub mod sender;
pub mod traits;

pub use error::{Result, TransportError};
pub use memory::MemoryTransport;
pub use sender::{CompletionHook, MessageSender};
pub use traits::FrameTransport;
