/// Errors that can occur while decoding or re-projecting messages.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The frame sequence is shorter than the tag's layout requires, or a
    /// fixed-width field has the wrong length.
    #[error("malformed {tag} message: {detail}")]
    MalformedMessage { tag: &'static str, detail: String },

    /// The tag byte is outside the enumerated set (strict decode only).
    #[error("unknown message type 0x{0:02x}")]
    UnknownMessageType(u8),
}

impl WireError {
    pub(crate) fn short(tag: &'static str, need: usize, got: usize) -> Self {
        WireError::MalformedMessage {
            tag,
            detail: format!("have {got} frames, need {need}"),
        }
    }

    pub(crate) fn width(tag: &'static str, field: &str, need: usize, got: usize) -> Self {
        WireError::MalformedMessage {
            tag,
            detail: format!("{field} field is {got} bytes, expected {need}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, WireError>;
