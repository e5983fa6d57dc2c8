//! Per-tag frame layout registry.
//!
//! Every message is an ordered sequence of frames where frame 0 is always
//! empty and frame 1 carries the tag byte. The constants below give each
//! field its fixed position for the tag that uses it. Several unrelated
//! tags reuse the same numeric index (e.g. [`USER`] and [`INFO`]); each
//! variant's constructor and accessors agree on the index through this
//! registry, which is the single source of truth for layouts.

use crate::tag::Tag;

/// Reserved envelope delimiter. Always empty.
pub const EMPTY: usize = 0;
/// The one-byte type tag.
pub const TYPE: usize = 1;
/// Platform name (OK, KIQ_MESSAGE, PLATFORM_*, FAIL). For TASK this slot
/// holds the 3-byte origin marker instead.
pub const PLATFORM: usize = 2;
/// Message identifier.
pub const ID: usize = 3;
/// KIQ_MESSAGE payload.
pub const PAYLOAD: usize = 3;
/// Originating user (PLATFORM_MESSAGE, PLATFORM_ERROR, PLATFORM_REQUEST).
pub const USER: usize = 4;
/// PLATFORM_INFO info body.
pub const INFO: usize = 4;
/// TASK description.
pub const DESCRIPTION: usize = 4;
/// Post or request content.
pub const CONTENT: usize = 5;
/// PLATFORM_ERROR error text.
pub const ERROR: usize = 5;
/// PLATFORM_INFO info type.
pub const INFO_TYPE: usize = 5;
/// TASK task type.
pub const TASK_TYPE: usize = 5;
/// PLATFORM_MESSAGE attached URLs.
pub const URLS: usize = 6;
/// PLATFORM_REQUEST arguments.
pub const REQUEST_ARGS: usize = 6;
/// TASK technology marker.
pub const TECH: usize = 6;
/// Repost flag, exactly one byte.
pub const REPOST: usize = 7;
/// TASK log excerpt.
pub const LOGS: usize = 7;
/// PLATFORM_MESSAGE arguments.
pub const ARGS: usize = 8;
/// Command code, exactly four bytes big-endian.
pub const CMD: usize = 9;
/// PLATFORM_MESSAGE timestamp text.
pub const TIME: usize = 10;

/// Fixed 3-byte literal identifying the origin system, carried in frame 2
/// of TASK messages.
pub const ORIGIN_MARKER: [u8; 3] = *b"KIQ";

/// Minimum number of frames a valid message of the given tag carries.
pub fn required_frames(tag: Tag) -> usize {
    match tag {
        Tag::Ok => 4,
        Tag::KeepAlive => 2,
        Tag::Kiq => 4,
        Tag::Platform => 11,
        Tag::PlatformError => 6,
        Tag::PlatformRequest => 7,
        Tag::PlatformInfo => 6,
        Tag::Fail => 4,
        Tag::Status => 2,
        Tag::Task => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layout_covers_its_highest_index() {
        // The largest field index used by each tag must fit inside the
        // required frame count.
        assert_eq!(required_frames(Tag::Platform), TIME + 1);
        assert_eq!(required_frames(Tag::PlatformRequest), REQUEST_ARGS + 1);
        assert_eq!(required_frames(Tag::PlatformError), ERROR + 1);
        assert_eq!(required_frames(Tag::PlatformInfo), INFO_TYPE + 1);
        assert_eq!(required_frames(Tag::Task), LOGS + 1);
        assert_eq!(required_frames(Tag::Ok), ID + 1);
        assert_eq!(required_frames(Tag::Fail), ID + 1);
        assert_eq!(required_frames(Tag::Kiq), PAYLOAD + 1);
        assert_eq!(required_frames(Tag::KeepAlive), TYPE + 1);
        assert_eq!(required_frames(Tag::Status), TYPE + 1);
    }
}
