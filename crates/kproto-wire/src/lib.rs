//! Fixed-framing binary wire format for kproto IPC.
//!
//! Every message is an ordered sequence of opaque byte frames:
//! - frame 0 is always empty (envelope delimiter)
//! - frame 1 is the one-byte type tag
//! - frames 2..N are variant-specific fields
//!
//! Text fields are UTF-8, flags are one byte (non-zero is true), command
//! codes are four bytes big-endian. The layout of frames 2..N is fully
//! determined by the tag; [`layout`] is the registry that fixes every
//! field's position.

pub mod codec;
pub mod command;
pub mod error;
pub mod field;
pub mod layout;
pub mod message;
pub mod tag;

pub use codec::{decode, encode};
pub use command::Command;
pub use error::{Result, WireError};
pub use message::{
    FailMessage, KeepAlive, KiqMessage, Message, OkMessage, PlatformError, PlatformInfo,
    PlatformMessage, PlatformRequest, RawMessage, StatusCheck, TaskMessage,
};
pub use tag::Tag;
