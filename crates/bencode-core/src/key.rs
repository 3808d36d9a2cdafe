//! Reversible string form for dictionary keys that are not valid UTF-8.
//!
//! Bencode dictionary keys are raw byte strings, but JSON objects (and most
//! other string-keyed maps) can only hold text. Keys that decode as UTF-8 are
//! carried verbatim; any other key is written as a placeholder of the shape
//! `ByteArray[b0,b1,...]`, one decimal byte value per element, no spaces.
//!
//! ```
//! use bencode_core::key::{decode_key, encode_key, is_placeholder_key};
//!
//! let key = encode_key(&[0xff, 0x00, 0x41]);
//! assert_eq!(key, "ByteArray[255,0,65]");
//! assert!(is_placeholder_key(&key));
//! assert_eq!(decode_key(&key).unwrap(), vec![0xff, 0x00, 0x41]);
//!
//! assert_eq!(encode_key(b"announce"), "announce");
//! ```
//!
//! A placeholder is only read back as raw bytes when those bytes are not
//! valid UTF-8, so text keys shaped like placeholders survive unchanged. The
//! one remaining collision is a text key spelling out the placeholder of some
//! non-UTF-8 key. [`crate::Value`] itself keys dictionaries by [`ByteString`]
//! and never needs this codec.

use crate::error::{BencodeError, Result};
use crate::utf8::is_valid_utf8;
use crate::value::ByteString;

const PLACEHOLDER_PREFIX: &str = "ByteArray[";
const PLACEHOLDER_SUFFIX: &str = "]";

/// String form of a dictionary key: the text itself when `bytes` is valid
/// UTF-8, a `ByteArray[...]` placeholder otherwise.
pub fn encode_key(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(_) => placeholder(bytes),
    }
}

/// `true` if `key` has the exact placeholder shape: the `ByteArray[` prefix,
/// the `]` suffix, and a non-empty comma-separated list of decimal integers in
/// `0..=255` in between (no signs, no whitespace, no leading zeros).
pub fn is_placeholder_key(key: &str) -> bool {
    parse_placeholder(key).is_some()
}

/// Recovers the raw bytes carried by a placeholder key.
pub fn decode_key(key: &str) -> Result<Vec<u8>> {
    parse_placeholder(key).ok_or_else(|| BencodeError::InvalidKeyPlaceholder(key.to_string()))
}

/// Turns a string-carrier key back into a dictionary key. Placeholders whose
/// bytes are not valid UTF-8 become raw bytes; everything else stays text, since
/// [`encode_key`] never writes a placeholder for a UTF-8 key.
pub fn key_from_string(key: String) -> ByteString {
    match parse_placeholder(&key) {
        Some(bytes) if !is_valid_utf8(&bytes) => ByteString::Raw(bytes),
        _ => ByteString::Text(key),
    }
}

fn placeholder(bytes: &[u8]) -> String {
    let body: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
    format!("{}{}{}", PLACEHOLDER_PREFIX, body.join(","), PLACEHOLDER_SUFFIX)
}

fn parse_placeholder(key: &str) -> Option<Vec<u8>> {
    let body = key
        .strip_prefix(PLACEHOLDER_PREFIX)?
        .strip_suffix(PLACEHOLDER_SUFFIX)?;
    // encode_key never produces an empty placeholder: empty keys are valid text
    if body.is_empty() {
        return None;
    }
    body.split(',').map(parse_byte).collect()
}

fn parse_byte(digits: &str) -> Option<u8> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_keys_pass_through() {
        assert_eq!(encode_key(b"piece length"), "piece length");
        assert_eq!(encode_key(b""), "");
        assert_eq!(encode_key("名前".as_bytes()), "名前");
    }

    #[test]
    fn non_utf8_keys_become_placeholders() {
        assert_eq!(encode_key(&[0x80]), "ByteArray[128]");
        assert_eq!(encode_key(&[0, 255, 0x80]), "ByteArray[0,255,128]");
    }

    #[test]
    fn placeholder_shape_is_strict() {
        assert!(is_placeholder_key("ByteArray[0]"));
        assert!(is_placeholder_key("ByteArray[1,22,255]"));

        assert!(!is_placeholder_key("ByteArray[]"));
        assert!(!is_placeholder_key("ByteArray[256]"));
        assert!(!is_placeholder_key("ByteArray[-1]"));
        assert!(!is_placeholder_key("ByteArray[1, 2]"));
        assert!(!is_placeholder_key("ByteArray[1,,2]"));
        assert!(!is_placeholder_key("ByteArray[1,2,]"));
        assert!(!is_placeholder_key("ByteArray[01]"));
        assert!(!is_placeholder_key("ByteArray[1]x"));
        assert!(!is_placeholder_key(" ByteArray[1]"));
        assert!(!is_placeholder_key("bytearray[1]"));
        assert!(!is_placeholder_key("ByteArray[a]"));
    }

    #[test]
    fn decode_key_rejects_non_placeholders() {
        let err = decode_key("announce").unwrap_err();
        assert!(matches!(err, BencodeError::InvalidKeyPlaceholder(ref k) if k == "announce"));
        assert!(decode_key("ByteArray[300]").is_err());
    }

    #[test]
    fn placeholder_roundtrips_bytes() {
        let raw: Vec<u8> = vec![0xaa, 0xf4, 0xc6, 0x1d, 0x00, 0xff];
        assert_eq!(decode_key(&encode_key(&raw)).unwrap(), raw);
    }

    #[test]
    fn key_from_string_restores_raw_bytes() {
        assert_eq!(key_from_string("ByteArray[255]".into()), ByteString::raw(vec![0xffu8]));
        assert!(key_from_string("ByteArray[255]".into()).as_str().is_none());
        assert!(key_from_string("name".into()).is_text());
    }

    #[test]
    fn key_from_string_keeps_utf8_placeholder_shapes_as_text() {
        // encode_key would have written these bytes as plain text
        let key = key_from_string("ByteArray[97]".into());
        assert_eq!(key.as_str(), Some("ByteArray[97]"));
        assert_eq!(key_from_string("ByteArray[1]".into()).as_bytes(), b"ByteArray[1]");
    }
}
