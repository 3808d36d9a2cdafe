//! Error types for Bencode encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur during Bencode encoding or decoding.
///
/// Decode-side variants carry the byte offset at which the problem was
/// detected, so callers can point at the offending spot in a `.torrent` file.
#[derive(Error, Debug)]
pub enum BencodeError {
    /// Non-digit characters inside an `i...e` span, an empty span, a leading
    /// zero, or negative zero.
    #[error("malformed integer at byte {position}: {message}")]
    MalformedInteger { position: usize, message: String },

    /// The integer literal is well-formed but does not fit in an `i64`.
    #[error("integer out of range: {literal}")]
    IntegerOverflow { literal: String },

    /// The length prefix of a byte string is empty, contains a non-digit,
    /// or does not fit in `usize`.
    #[error("malformed byte string length at byte {position}: {message}")]
    MalformedLength { position: usize, message: String },

    /// The input ended before a terminator or a length-prefixed payload.
    #[error("truncated input at byte {position}: expected {expected}")]
    Truncated { position: usize, expected: String },

    /// Lists or dictionaries nest deeper than the decoder's configured limit.
    #[error("nesting deeper than {limit} levels at byte {position}")]
    NestingTooDeep { position: usize, limit: usize },

    /// Bytes remain after the top-level value and the decoder was told to reject them.
    #[error("trailing data after value at byte {position}")]
    TrailingData { position: usize },

    /// The encoder was handed something that is not an integer, byte string,
    /// list or dictionary. The payload names the offending kind.
    #[error("unsupported data type '{0}'")]
    UnsupportedType(String),

    /// `decode_key` was called on a string that is not a byte-key placeholder.
    #[error("invalid byte key placeholder: {0}")]
    InvalidKeyPlaceholder(String),

    /// Two JSON object keys map to the same dictionary key.
    #[error("duplicate dictionary key: {0}")]
    DuplicateKey(String),

    /// The input string was not valid JSON (JSON carrier path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Writing encoded output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout bencode-core.
pub type Result<T> = std::result::Result<T, BencodeError>;
