//! Frame-sequence to message mapping.
//!
//! [`decode`] dispatches on the tag byte at the fixed tag index and hands
//! the frames to the matching variant's re-projection. [`encode`] is a
//! plain accessor: variants already store their canonical frame form.

use bytes::Bytes;
use tracing::trace;

use crate::error::{Result, WireError};
use crate::layout;
use crate::message::{
    FailMessage, KeepAlive, KiqMessage, Message, OkMessage, PlatformError, PlatformInfo,
    PlatformMessage, PlatformRequest, RawMessage, StatusCheck, TaskMessage,
};
use crate::tag::Tag;

/// Decode a received frame sequence into a concrete message.
///
/// An unknown tag byte fails with [`WireError::UnknownMessageType`] unless
/// `lenient` is set, in which case the frames are passed through unmodified
/// as [`Message::Raw`] (forward compatibility path).
pub fn decode(frames: Vec<Bytes>, lenient: bool) -> Result<Message> {
    let tag_byte = frames
        .get(layout::TYPE)
        .and_then(|frame| frame.first().copied())
        .ok_or_else(|| WireError::MalformedMessage {
            tag: "<untagged>",
            detail: "no tag byte at the tag index".to_string(),
        })?;

    let Some(tag) = Tag::from_byte(tag_byte) else {
        if lenient {
            trace!(tag_byte, "passing through unknown message type");
            return Ok(Message::Raw(RawMessage::new(frames)));
        }
        return Err(WireError::UnknownMessageType(tag_byte));
    };

    let message = match tag {
        Tag::Ok => Message::Ok(OkMessage::from_frames(&frames)?),
        Tag::KeepAlive => Message::KeepAlive(KeepAlive::from_frames(&frames)?),
        Tag::Kiq => Message::Kiq(KiqMessage::from_frames(&frames)?),
        Tag::Platform => Message::Platform(PlatformMessage::from_frames(&frames)?),
        Tag::PlatformError => Message::PlatformError(PlatformError::from_frames(&frames)?),
        Tag::PlatformRequest => Message::PlatformRequest(PlatformRequest::from_frames(&frames)?),
        Tag::PlatformInfo => Message::PlatformInfo(PlatformInfo::from_frames(&frames)?),
        Tag::Fail => Message::Fail(FailMessage::from_frames(&frames)?),
        Tag::Status => Message::Status(StatusCheck::from_frames(&frames)?),
        Tag::Task => Message::Task(TaskMessage::from_frames(&frames)?),
    };
    Ok(message)
}

/// The message's canonical frame sequence, ready for transmission.
pub fn encode(message: &Message) -> &[Bytes] {
    message.frames()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(message: Message) {
        let frames = encode(&message).to_vec();
        let decoded = decode(frames, false).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn every_tag_roundtrips() {
        roundtrip(OkMessage::new("mastodon", "11").into());
        roundtrip(KeepAlive::new().into());
        roundtrip(KiqMessage::new("discord", "restart workers").into());
        roundtrip(
            PlatformMessage::new(
                "telegram",
                "8841",
                "logicp",
                "post body",
                "https://example.org/a.png",
                true,
                "{\"lang\":\"en\"}",
                2,
                "1692650000",
            )
            .into(),
        );
        roundtrip(PlatformError::new("telegram", "8841", "logicp", "send failed").into());
        roundtrip(PlatformRequest::new("telegram", "8841", "logicp", "hi", "{}").into());
        roundtrip(PlatformInfo::new("telegram", "8841", "rate limited", "warning").into());
        roundtrip(FailMessage::new("telegram", "8841").into());
        roundtrip(StatusCheck::new().into());
        roundtrip(TaskMessage::new("91", "triage crash", "bug", "rust", "stack trace").into());
    }

    #[test]
    fn cmd_extremes_survive_the_roundtrip() {
        for cmd in [0u32, u32::MAX] {
            let message: Message =
                PlatformMessage::new("p", "i", "u", "c", "", false, "", cmd, "t").into();
            let decoded = decode(message.frames().to_vec(), false).unwrap();
            let Message::Platform(platform) = decoded else {
                panic!("wrong variant");
            };
            assert_eq!(platform.cmd(), cmd);
        }
    }

    #[test]
    fn unknown_tag_fails_strict_decode() {
        let frames = vec![Bytes::new(), Bytes::from_static(&[0x4A]), Bytes::from_static(b"x")];
        let err = decode(frames, false).unwrap_err();
        assert!(matches!(err, WireError::UnknownMessageType(0x4A)));
    }

    #[test]
    fn unknown_tag_passes_through_in_lenient_mode() {
        let frames = vec![
            Bytes::new(),
            Bytes::from_static(&[0xEE]),
            Bytes::from_static(b"opaque"),
            Bytes::from_static(b"tail"),
        ];
        let decoded = decode(frames.clone(), true).unwrap();
        let Message::Raw(raw) = decoded else {
            panic!("expected pass-through");
        };
        assert_eq!(raw.frames(), frames.as_slice());
        assert_eq!(raw.tag_byte(), Some(0xEE));
    }

    #[test]
    fn known_tag_with_short_frames_is_malformed_even_leniently() {
        // Lenient mode only tolerates unknown tags, never malformed known ones.
        let frames = vec![Bytes::new(), Bytes::copy_from_slice(&[Tag::Ok.byte()])];
        let err = decode(frames, true).unwrap_err();
        assert!(matches!(err, WireError::MalformedMessage { .. }));
    }

    #[test]
    fn missing_tag_frame_is_malformed() {
        let err = decode(vec![Bytes::new()], false).unwrap_err();
        assert!(matches!(err, WireError::MalformedMessage { .. }));

        let err = decode(vec![Bytes::new(), Bytes::new()], true).unwrap_err();
        assert!(matches!(err, WireError::MalformedMessage { .. }));
    }

    #[test]
    fn encode_returns_stored_frames_verbatim() {
        let message: Message = KiqMessage::new("p", "payload").into();
        assert_eq!(encode(&message), message.frames());
    }
}
