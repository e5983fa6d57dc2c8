//! Byte encodings for the field types that appear in frames.
//!
//! Text is raw UTF-8, a flag is a single byte (non-zero means true), and a
//! command code is four bytes big-endian. Nothing here interprets a frame
//! except through the index its variant's layout assigns to it.

use std::borrow::Cow;

use bytes::Bytes;

/// Encode a text field.
pub fn text(value: &str) -> Bytes {
    Bytes::copy_from_slice(value.as_bytes())
}

/// Decode a text field. Invalid UTF-8 is replaced, never rejected; text
/// fields carry no width contract.
pub fn text_at(frames: &[Bytes], index: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(&frames[index])
}

/// Encode a flag field as one byte.
pub fn flag(value: bool) -> Bytes {
    Bytes::copy_from_slice(&[u8::from(value)])
}

/// Decode a flag field: any non-zero byte is true.
pub fn flag_at(frames: &[Bytes], index: usize) -> bool {
    frames[index][0] != 0x00
}

/// Encode a command code as four bytes, big-endian.
pub fn code(value: u32) -> Bytes {
    Bytes::copy_from_slice(&value.to_be_bytes())
}

/// Decode a command code from its four big-endian bytes.
pub fn code_at(frames: &[Bytes], index: usize) -> u32 {
    let bytes: [u8; 4] = frames[index][..4].try_into().unwrap_or([0; 4]);
    u32::from_be_bytes(bytes)
}
