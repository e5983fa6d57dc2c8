use std::fmt;

/// One-byte discriminator identifying which message variant a frame
/// sequence encodes. The set is closed: every wire value is listed here,
/// and decode dispatch matches on this enum exhaustively.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Positive acknowledgement.
    Ok = 0x00,
    /// Peer heartbeat.
    KeepAlive = 0x01,
    /// Free-form payload addressed to the KIQ core.
    Kiq = 0x02,
    /// Full platform post (content, urls, repost flag, command code).
    Platform = 0x03,
    /// Error raised while handling a platform post.
    PlatformError = 0x04,
    /// Inbound request originating from a platform user.
    PlatformRequest = 0x05,
    /// Platform metadata notification.
    PlatformInfo = 0x06,
    /// Negative acknowledgement.
    Fail = 0x07,
    /// Liveness probe for the whole endpoint.
    Status = 0x08,
    /// Work item exported to an external tracker.
    Task = 0x09,
}

impl Tag {
    /// All tags, in wire-byte order.
    pub const ALL: [Tag; 10] = [
        Tag::Ok,
        Tag::KeepAlive,
        Tag::Kiq,
        Tag::Platform,
        Tag::PlatformError,
        Tag::PlatformRequest,
        Tag::PlatformInfo,
        Tag::Fail,
        Tag::Status,
        Tag::Task,
    ];

    /// Map a wire byte to a tag. Returns `None` for bytes outside the set.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Tag::Ok),
            0x01 => Some(Tag::KeepAlive),
            0x02 => Some(Tag::Kiq),
            0x03 => Some(Tag::Platform),
            0x04 => Some(Tag::PlatformError),
            0x05 => Some(Tag::PlatformRequest),
            0x06 => Some(Tag::PlatformInfo),
            0x07 => Some(Tag::Fail),
            0x08 => Some(Tag::Status),
            0x09 => Some(Tag::Task),
            _ => None,
        }
    }

    /// The wire byte for this tag.
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Catalogue spelling of the tag, as used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Ok => "OK",
            Tag::KeepAlive => "KEEPALIVE",
            Tag::Kiq => "KIQ_MESSAGE",
            Tag::Platform => "PLATFORM_MESSAGE",
            Tag::PlatformError => "PLATFORM_ERROR",
            Tag::PlatformRequest => "PLATFORM_REQUEST",
            Tag::PlatformInfo => "PLATFORM_INFO",
            Tag::Fail => "FAIL",
            Tag::Status => "STATUS",
            Tag::Task => "TASK",
        }
    }

    /// True for the heartbeat tag.
    pub fn is_keepalive(self) -> bool {
        self == Tag::KeepAlive
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_mapping_is_a_bijection_over_the_set() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_byte(tag.byte()), Some(tag));
        }
    }

    #[test]
    fn bytes_outside_the_set_are_rejected() {
        for byte in 0x0Au8..=0xFF {
            assert_eq!(Tag::from_byte(byte), None);
        }
    }

    #[test]
    fn keepalive_predicate() {
        assert!(Tag::KeepAlive.is_keepalive());
        assert!(!Tag::Status.is_keepalive());
    }
}
