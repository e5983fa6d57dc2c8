//! Inter-process message protocol with peer liveness tracking.
//!
//! ```text
//!             ┌───────────────────────────────────────┐
//!             │              PROTOCOL                 │
//!             │        frame 0: empty                 │
//!             │        frame 1: type tag              │
//!             │        frames 2..N: fields            │
//!             └───────────────────────────────────────┘
//! ```
//!
//! Transmission flows `Message` → [`codec`] → frames → [`MessageSender`] →
//! transport; reception is the reverse. The [`SessionDaemon`] is
//! independent of the codec: the owning application registers peers and
//! feeds it heartbeats as KEEPALIVE-class messages arrive.
//!
//! [`codec`]: kproto_wire::codec

pub use kproto_session::{Diagnostics, SessionConfig, SessionDaemon, SCAN_INTERVAL, STALE_AFTER};
pub use kproto_transport::{
    FrameTransport, MemoryTransport, MessageSender, TransportError,
};
pub use kproto_wire::{
    decode, encode, Command, FailMessage, KeepAlive, KiqMessage, Message, OkMessage,
    PlatformError, PlatformInfo, PlatformMessage, PlatformRequest, RawMessage, StatusCheck, Tag,
    TaskMessage, WireError,
};
