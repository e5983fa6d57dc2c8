//! Peer liveness tracking for kproto IPC sessions.
//!
//! A [`SessionDaemon`] owns a registry of peers and their last-heartbeat
//! timestamps. Peers are registered with an eviction callback; a background
//! monitor reaps peers that fall silent past the staleness budget, while
//! explicit heartbeats give request-handling code prompt feedback.
//!
//! The daemon is driven by the owning application: it knows nothing about
//! the wire format, only peer identifiers and time.

pub mod daemon;
pub mod diag;

pub use daemon::{SessionConfig, SessionDaemon, StaleHook, SCAN_INTERVAL, STALE_AFTER};
pub use diag::Diagnostics;
