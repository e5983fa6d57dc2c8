//! Message variant taxonomy.
//!
//! Each variant owns its canonical frame vector: frame 0 empty, frame 1 the
//! tag byte, frames 2..N the field encodings in the order fixed by
//! [`crate::layout`]. Construction canonicalizes; encoding later is a plain
//! accessor. Messages are immutable once built.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::error::{Result, WireError};
use crate::field;
use crate::layout;
use crate::tag::Tag;

/// Characters of content kept in diagnostic summaries.
const SUMMARY_CLIP: usize = 120;

fn empty() -> Bytes {
    Bytes::new()
}

fn tag_frame(tag: Tag) -> Bytes {
    Bytes::copy_from_slice(&[tag.byte()])
}

fn require(tag: Tag, frames: &[Bytes]) -> Result<()> {
    let need = layout::required_frames(tag);
    if frames.len() < need {
        return Err(WireError::short(tag.name(), need, frames.len()));
    }
    Ok(())
}

fn clip(value: &str) -> String {
    value.chars().take(SUMMARY_CLIP).collect()
}

/// Positive acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OkMessage {
    frames: Vec<Bytes>,
}

impl OkMessage {
    pub fn new(platform: &str, id: &str) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Ok),
                field::text(platform),
                field::text(id),
            ],
        }
    }

    /// Re-project a received frame sequence into a canonical message.
    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::Ok, frames)?;
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Ok),
                frames[layout::PLATFORM].clone(),
                frames[layout::ID].clone(),
            ],
        })
    }

    pub fn platform(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn id(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ID)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for OkMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Platform):{},(ID):{}",
            Tag::Ok,
            self.platform(),
            self.id()
        )
    }
}

/// Peer heartbeat. Carries no fields beyond the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeepAlive {
    frames: Vec<Bytes>,
}

impl KeepAlive {
    pub fn new() -> Self {
        Self {
            frames: vec![empty(), tag_frame(Tag::KeepAlive)],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::KeepAlive, frames)?;
        Ok(Self::new())
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl Default for KeepAlive {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for KeepAlive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Type):{}", Tag::KeepAlive)
    }
}

/// Free-form payload addressed to the KIQ core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KiqMessage {
    frames: Vec<Bytes>,
}

impl KiqMessage {
    pub fn new(platform: &str, payload: &str) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Kiq),
                field::text(platform),
                field::text(payload),
            ],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::Kiq, frames)?;
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Kiq),
                frames[layout::PLATFORM].clone(),
                frames[layout::PAYLOAD].clone(),
            ],
        })
    }

    pub fn platform(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn payload(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PAYLOAD)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for KiqMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Platform):{},(Payload):{}",
            Tag::Kiq,
            self.platform(),
            self.payload()
        )
    }
}

/// Full platform post: content, urls, repost flag, command code, timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformMessage {
    frames: Vec<Bytes>,
}

impl PlatformMessage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        platform: &str,
        id: &str,
        user: &str,
        content: &str,
        urls: &str,
        repost: bool,
        args: &str,
        cmd: u32,
        time: &str,
    ) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Platform),
                field::text(platform),
                field::text(id),
                field::text(user),
                field::text(content),
                field::text(urls),
                field::flag(repost),
                field::text(args),
                field::code(cmd),
                field::text(time),
            ],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::Platform, frames)?;
        let repost = &frames[layout::REPOST];
        if repost.len() != 1 {
            return Err(WireError::width(Tag::Platform.name(), "repost", 1, repost.len()));
        }
        let cmd = &frames[layout::CMD];
        if cmd.len() != 4 {
            return Err(WireError::width(Tag::Platform.name(), "cmd", 4, cmd.len()));
        }
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Platform),
                frames[layout::PLATFORM].clone(),
                frames[layout::ID].clone(),
                frames[layout::USER].clone(),
                frames[layout::CONTENT].clone(),
                frames[layout::URLS].clone(),
                frames[layout::REPOST].clone(),
                frames[layout::ARGS].clone(),
                frames[layout::CMD].clone(),
                frames[layout::TIME].clone(),
            ],
        })
    }

    pub fn platform(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn id(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ID)
    }

    pub fn user(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::USER)
    }

    pub fn content(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::CONTENT)
    }

    pub fn urls(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::URLS)
    }

    pub fn repost(&self) -> bool {
        field::flag_at(&self.frames, layout::REPOST)
    }

    pub fn args(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ARGS)
    }

    pub fn cmd(&self) -> u32 {
        field::code_at(&self.frames, layout::CMD)
    }

    pub fn time(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::TIME)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for PlatformMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Platform):{},(ID):{},(User):{},(Content):{},(URLS):{},(Repost):{},(Args):{},(Cmd):{},(Time):{}",
            Tag::Platform,
            self.platform(),
            self.id(),
            self.user(),
            clip(&self.content()),
            self.urls(),
            self.repost(),
            self.args(),
            self.cmd(),
            self.time()
        )
    }
}

/// Error raised while handling a platform post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    frames: Vec<Bytes>,
}

impl PlatformError {
    pub fn new(platform: &str, id: &str, user: &str, error: &str) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::PlatformError),
                field::text(platform),
                field::text(id),
                field::text(user),
                field::text(error),
            ],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::PlatformError, frames)?;
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::PlatformError),
                frames[layout::PLATFORM].clone(),
                frames[layout::ID].clone(),
                frames[layout::USER].clone(),
                frames[layout::ERROR].clone(),
            ],
        })
    }

    pub fn platform(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn id(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ID)
    }

    pub fn user(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::USER)
    }

    pub fn error(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ERROR)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Platform):{},(ID):{},(User):{},(Error):{}",
            Tag::PlatformError,
            self.platform(),
            self.id(),
            self.user(),
            self.error()
        )
    }
}

/// Inbound request originating from a platform user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRequest {
    frames: Vec<Bytes>,
}

impl PlatformRequest {
    pub fn new(platform: &str, id: &str, user: &str, content: &str, args: &str) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::PlatformRequest),
                field::text(platform),
                field::text(id),
                field::text(user),
                field::text(content),
                field::text(args),
            ],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::PlatformRequest, frames)?;
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::PlatformRequest),
                frames[layout::PLATFORM].clone(),
                frames[layout::ID].clone(),
                frames[layout::USER].clone(),
                frames[layout::CONTENT].clone(),
                frames[layout::REQUEST_ARGS].clone(),
            ],
        })
    }

    pub fn platform(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn id(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ID)
    }

    pub fn user(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::USER)
    }

    pub fn content(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::CONTENT)
    }

    pub fn args(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::REQUEST_ARGS)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for PlatformRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Platform):{},(ID):{},(User):{},(Content):{},(Args):{}",
            Tag::PlatformRequest,
            self.platform(),
            self.id(),
            self.user(),
            clip(&self.content()),
            self.args()
        )
    }
}

/// Platform metadata notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    frames: Vec<Bytes>,
}

impl PlatformInfo {
    pub fn new(platform: &str, id: &str, info: &str, info_type: &str) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::PlatformInfo),
                field::text(platform),
                field::text(id),
                field::text(info),
                field::text(info_type),
            ],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::PlatformInfo, frames)?;
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::PlatformInfo),
                frames[layout::PLATFORM].clone(),
                frames[layout::ID].clone(),
                frames[layout::INFO].clone(),
                frames[layout::INFO_TYPE].clone(),
            ],
        })
    }

    pub fn platform(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn id(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ID)
    }

    pub fn info(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::INFO)
    }

    pub fn info_type(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::INFO_TYPE)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for PlatformInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Platform):{},(ID):{},(Info):{},(InfoType):{}",
            Tag::PlatformInfo,
            self.platform(),
            self.id(),
            self.info(),
            self.info_type()
        )
    }
}

/// Negative acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailMessage {
    frames: Vec<Bytes>,
}

impl FailMessage {
    pub fn new(platform: &str, id: &str) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Fail),
                field::text(platform),
                field::text(id),
            ],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::Fail, frames)?;
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Fail),
                frames[layout::PLATFORM].clone(),
                frames[layout::ID].clone(),
            ],
        })
    }

    pub fn platform(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn id(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ID)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for FailMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Platform):{},(ID):{}",
            Tag::Fail,
            self.platform(),
            self.id()
        )
    }
}

/// Liveness probe for the whole endpoint. No fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCheck {
    frames: Vec<Bytes>,
}

impl StatusCheck {
    pub fn new() -> Self {
        Self {
            frames: vec![empty(), tag_frame(Tag::Status)],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::Status, frames)?;
        Ok(Self::new())
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl Default for StatusCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StatusCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Type):{}", Tag::Status)
    }
}

/// Work item exported to an external tracker. Frame 2 carries the fixed
/// 3-byte origin marker instead of a platform name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMessage {
    frames: Vec<Bytes>,
}

impl TaskMessage {
    pub fn new(id: &str, description: &str, task_type: &str, tech: &str, logs: &str) -> Self {
        Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Task),
                Bytes::copy_from_slice(&layout::ORIGIN_MARKER),
                field::text(id),
                field::text(description),
                field::text(task_type),
                field::text(tech),
                field::text(logs),
            ],
        }
    }

    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        require(Tag::Task, frames)?;
        let marker = &frames[layout::PLATFORM];
        if marker.len() != layout::ORIGIN_MARKER.len() {
            return Err(WireError::width(
                Tag::Task.name(),
                "origin marker",
                layout::ORIGIN_MARKER.len(),
                marker.len(),
            ));
        }
        Ok(Self {
            frames: vec![
                empty(),
                tag_frame(Tag::Task),
                frames[layout::PLATFORM].clone(),
                frames[layout::ID].clone(),
                frames[layout::DESCRIPTION].clone(),
                frames[layout::TASK_TYPE].clone(),
                frames[layout::TECH].clone(),
                frames[layout::LOGS].clone(),
            ],
        })
    }

    pub fn origin(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::PLATFORM)
    }

    pub fn id(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::ID)
    }

    pub fn description(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::DESCRIPTION)
    }

    pub fn task_type(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::TASK_TYPE)
    }

    pub fn tech(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::TECH)
    }

    pub fn logs(&self) -> Cow<'_, str> {
        field::text_at(&self.frames, layout::LOGS)
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for TaskMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(Type):{},(Origin):{},(ID):{},(Description):{},(TaskType):{},(Tech):{},(Logs):{}",
            Tag::Task,
            self.origin(),
            self.id(),
            self.description(),
            self.task_type(),
            self.tech(),
            clip(&self.logs())
        )
    }
}

/// Pass-through wrapper produced by lenient decode for tag bytes outside
/// the enumerated set. Frames are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    frames: Vec<Bytes>,
}

impl RawMessage {
    pub fn new(frames: Vec<Bytes>) -> Self {
        Self { frames }
    }

    /// The tag byte as received, if the sequence carries one.
    pub fn tag_byte(&self) -> Option<u8> {
        self.frames.get(layout::TYPE).and_then(|f| f.first().copied())
    }

    pub fn frames(&self) -> &[Bytes] {
        &self.frames
    }
}

impl fmt::Display for RawMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag_byte() {
            Some(byte) => write!(f, "(Type):0x{byte:02x},(Frames):{}", self.frames.len()),
            None => write!(f, "(Type):none,(Frames):{}", self.frames.len()),
        }
    }
}

/// Closed sum over every message variant plus the lenient pass-through.
///
/// Decode dispatch matches on [`Tag`] exhaustively, so adding a tag without
/// adding a variant (or the reverse) fails to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Ok(OkMessage),
    KeepAlive(KeepAlive),
    Kiq(KiqMessage),
    Platform(PlatformMessage),
    PlatformError(PlatformError),
    PlatformRequest(PlatformRequest),
    PlatformInfo(PlatformInfo),
    Fail(FailMessage),
    Status(StatusCheck),
    Task(TaskMessage),
    Raw(RawMessage),
}

impl Message {
    /// The variant's tag. `None` only for a pass-through whose tag byte is
    /// outside the enumerated set.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Message::Ok(_) => Some(Tag::Ok),
            Message::KeepAlive(_) => Some(Tag::KeepAlive),
            Message::Kiq(_) => Some(Tag::Kiq),
            Message::Platform(_) => Some(Tag::Platform),
            Message::PlatformError(_) => Some(Tag::PlatformError),
            Message::PlatformRequest(_) => Some(Tag::PlatformRequest),
            Message::PlatformInfo(_) => Some(Tag::PlatformInfo),
            Message::Fail(_) => Some(Tag::Fail),
            Message::Status(_) => Some(Tag::Status),
            Message::Task(_) => Some(Tag::Task),
            Message::Raw(raw) => raw.tag_byte().and_then(Tag::from_byte),
        }
    }

    /// The canonical frame sequence for transmission.
    pub fn frames(&self) -> &[Bytes] {
        match self {
            Message::Ok(m) => m.frames(),
            Message::KeepAlive(m) => m.frames(),
            Message::Kiq(m) => m.frames(),
            Message::Platform(m) => m.frames(),
            Message::PlatformError(m) => m.frames(),
            Message::PlatformRequest(m) => m.frames(),
            Message::PlatformInfo(m) => m.frames(),
            Message::Fail(m) => m.frames(),
            Message::Status(m) => m.frames(),
            Message::Task(m) => m.frames(),
            Message::Raw(m) => m.frames(),
        }
    }

    /// True when this message is a heartbeat.
    pub fn is_keepalive(&self) -> bool {
        matches!(self, Message::KeepAlive(_))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Ok(m) => m.fmt(f),
            Message::KeepAlive(m) => m.fmt(f),
            Message::Kiq(m) => m.fmt(f),
            Message::Platform(m) => m.fmt(f),
            Message::PlatformError(m) => m.fmt(f),
            Message::PlatformRequest(m) => m.fmt(f),
            Message::PlatformInfo(m) => m.fmt(f),
            Message::Fail(m) => m.fmt(f),
            Message::Status(m) => m.fmt(f),
            Message::Task(m) => m.fmt(f),
            Message::Raw(m) => m.fmt(f),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for Message {
            fn from(value: $ty) -> Self {
                Message::$variant(value)
            }
        })*
    };
}

impl_from_variant! {
    Ok => OkMessage,
    KeepAlive => KeepAlive,
    Kiq => KiqMessage,
    Platform => PlatformMessage,
    PlatformError => PlatformError,
    PlatformRequest => PlatformRequest,
    PlatformInfo => PlatformInfo,
    Fail => FailMessage,
    Status => StatusCheck,
    Task => TaskMessage,
    Raw => RawMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_invariants_hold_for_every_constructor() {
        let messages: Vec<Message> = vec![
            OkMessage::new("mastodon", "77").into(),
            KeepAlive::new().into(),
            KiqMessage::new("discord", "payload").into(),
            PlatformMessage::new("tg", "9", "u", "c", "", false, "", 0, "").into(),
            PlatformError::new("tg", "9", "u", "boom").into(),
            PlatformRequest::new("tg", "9", "u", "c", "{}").into(),
            PlatformInfo::new("tg", "9", "i", "t").into(),
            FailMessage::new("tg", "9").into(),
            StatusCheck::new().into(),
            TaskMessage::new("9", "d", "t", "rust", "").into(),
        ];

        for message in messages {
            let frames = message.frames();
            assert!(frames[layout::EMPTY].is_empty(), "{message}");
            assert_eq!(frames[layout::TYPE].len(), 1, "{message}");
            assert_eq!(
                frames[layout::TYPE][0],
                message.tag().unwrap().byte(),
                "{message}"
            );
            assert_eq!(
                frames.len(),
                layout::required_frames(message.tag().unwrap()),
                "{message}"
            );
        }
    }

    #[test]
    fn accessors_return_constructed_fields() {
        let msg = PlatformMessage::new(
            "mastodon",
            "id-1",
            "logicp",
            "hello world",
            "https://a https://b",
            true,
            "{\"k\":\"v\"}",
            3,
            "1692650000",
        );
        assert_eq!(msg.platform(), "mastodon");
        assert_eq!(msg.id(), "id-1");
        assert_eq!(msg.user(), "logicp");
        assert_eq!(msg.content(), "hello world");
        assert_eq!(msg.urls(), "https://a https://b");
        assert!(msg.repost());
        assert_eq!(msg.args(), "{\"k\":\"v\"}");
        assert_eq!(msg.cmd(), 3);
        assert_eq!(msg.time(), "1692650000");
    }

    #[test]
    fn short_frame_sequence_is_malformed() {
        let frames = vec![
            Bytes::new(),
            Bytes::copy_from_slice(&[Tag::PlatformRequest.byte()]),
            Bytes::from_static(b"tg"),
        ];
        let err = PlatformRequest::from_frames(&frames).unwrap_err();
        assert!(matches!(err, WireError::MalformedMessage { tag: "PLATFORM_REQUEST", .. }));
    }

    #[test]
    fn wrong_width_repost_is_malformed() {
        let good = PlatformMessage::new("p", "i", "u", "c", "", true, "", 1, "t");
        let mut frames = good.frames().to_vec();
        frames[layout::REPOST] = Bytes::from_static(b"yes");
        let err = PlatformMessage::from_frames(&frames).unwrap_err();
        assert!(matches!(err, WireError::MalformedMessage { .. }));
    }

    #[test]
    fn wrong_width_cmd_is_malformed() {
        let good = PlatformMessage::new("p", "i", "u", "c", "", false, "", 1, "t");
        let mut frames = good.frames().to_vec();
        frames[layout::CMD] = Bytes::from_static(&[0x01, 0x02]);
        let err = PlatformMessage::from_frames(&frames).unwrap_err();
        assert!(matches!(err, WireError::MalformedMessage { .. }));
    }

    #[test]
    fn task_carries_the_origin_marker() {
        let task = TaskMessage::new("42", "fix pager", "bug", "rust", "trace...");
        assert_eq!(task.origin(), "KIQ");
        assert_eq!(task.frames()[layout::PLATFORM].as_ref(), b"KIQ");
    }

    #[test]
    fn task_rejects_a_marker_of_the_wrong_width() {
        let task = TaskMessage::new("42", "d", "t", "rust", "");
        let mut frames = task.frames().to_vec();
        frames[layout::PLATFORM] = Bytes::from_static(b"KIQX");
        let err = TaskMessage::from_frames(&frames).unwrap_err();
        assert!(matches!(err, WireError::MalformedMessage { tag: "TASK", .. }));
    }

    #[test]
    fn reprojection_preserves_field_bytes() {
        let original = PlatformError::new("youtube", "55", "viewer", "quota exceeded");
        let rebuilt = PlatformError::from_frames(original.frames()).unwrap();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn summary_renders_every_field() {
        let msg = PlatformRequest::new("kiq", "1234", "logicp", "hello", "{\"key\":\"value\"}");
        let summary = msg.to_string();
        for needle in ["PLATFORM_REQUEST", "kiq", "1234", "logicp", "hello", "value"] {
            assert!(summary.contains(needle), "missing {needle} in {summary}");
        }
    }

    #[test]
    fn summary_clips_long_content() {
        let long = "x".repeat(500);
        let msg = PlatformRequest::new("p", "i", "u", &long, "");
        assert!(!msg.to_string().contains(&long));
    }

    #[test]
    fn raw_message_keeps_frames_untouched() {
        let frames = vec![
            Bytes::from_static(b"not-empty"),
            Bytes::from_static(&[0x7F]),
            Bytes::from_static(b"junk"),
        ];
        let raw = RawMessage::new(frames.clone());
        assert_eq!(raw.frames(), frames.as_slice());
        assert_eq!(raw.tag_byte(), Some(0x7F));
    }
}
