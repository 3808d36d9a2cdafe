//! Strict UTF-8 classification of decoded byte strings.
//!
//! Bencode byte strings carry no encoding marker. A payload is treated as text
//! only when its bytes are strictly valid UTF-8: overlong forms, surrogate code
//! points (`U+D800..=U+DFFF`) and anything above `U+10FFFF` are rejected. This
//! decides the variant of the decoded value, so a 20-byte SHA-1 digest in a
//! `pieces` field stays raw instead of being mangled into replacement chars.

use crate::value::ByteString;
use tracing::debug;

/// Returns `true` if `bytes` is strictly valid UTF-8. Empty input is valid.
pub fn is_valid_utf8(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

/// Offset of the first byte that breaks UTF-8 validity, or `None` if the
/// whole sequence is valid.
pub fn invalid_offset(bytes: &[u8]) -> Option<usize> {
    std::str::from_utf8(bytes).err().map(|e| e.valid_up_to())
}

/// Wraps a decoded payload as text when it is strictly valid UTF-8, raw bytes otherwise.
pub(crate) fn classify(bytes: &[u8]) -> ByteString {
    match std::str::from_utf8(bytes) {
        Ok(text) => ByteString::Text(text.to_owned()),
        Err(e) => {
            debug!(
                len = bytes.len(),
                valid_up_to = e.valid_up_to(),
                "byte string is not valid UTF-8, keeping raw bytes"
            );
            ByteString::Raw(bytes.to_vec())
        }
    }
}
