//! Command codes carried in the CMD field of PLATFORM_MESSAGE.

/// Request name for a plain message.
pub const REQUEST_MESSAGE: &str = "message";
/// Request name for creating a poll.
pub const REQUEST_CREATE_POLL: &str = "poll";
/// Request name for scheduling a poll stop.
pub const REQUEST_SCHEDULE_POLL_STOP: &str = "poll stop";
/// Request name for processing a poll result.
pub const REQUEST_PROCESS_POLL_RESULT: &str = "poll result";

/// Command vocabulary for platform posts. The wire carries these as the
/// 4-byte big-endian CMD field.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Message = 0x00,
    Poll = 0x01,
    PollStop = 0x02,
    PollResult = 0x03,
    Unknown = 0x04,
}

impl Command {
    /// Map a request name to its command code. Unrecognized names fall
    /// back to [`Command::Unknown`].
    pub fn from_request(name: &str) -> Self {
        match name {
            REQUEST_MESSAGE => Command::Message,
            REQUEST_CREATE_POLL => Command::Poll,
            REQUEST_SCHEDULE_POLL_STOP => Command::PollStop,
            REQUEST_PROCESS_POLL_RESULT => Command::PollResult,
            _ => Command::Unknown,
        }
    }

    /// The command's wire code.
    pub fn code(self) -> u32 {
        self as u32
    }
}
