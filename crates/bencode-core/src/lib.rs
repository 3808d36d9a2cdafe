//! # bencode-core
//!
//! Pure-Rust encoder and decoder for **Bencode**, the serialization format of
//! the BitTorrent protocol.
//!
//! Bencode has four kinds of values: integers (`i42e`), length-prefixed byte
//! strings (`4:spam`), lists (`l...e`) and dictionaries (`d...e`). Decoding is
//! byte-exact: byte strings that are valid UTF-8 come back as text, everything
//! else (such as the SHA-1 digests in a torrent's `pieces`) comes back as raw
//! bytes. Encoding is canonical: dictionary keys are always emitted in
//! byte-lexicographic order, so the same value always hashes the same.
//!
//! ## Quick start
//!
//! ```rust
//! use bencode_core::{decode, encode, Value};
//!
//! let value = decode(b"d3:bar4:spam3:fooi42ee").unwrap();
//! assert_eq!(value.get(b"foo"), Some(&Value::Integer(42)));
//! assert_eq!(value.get(b"bar").and_then(Value::as_str), Some("spam"));
//!
//! // Canonical input roundtrips byte for byte
//! assert_eq!(encode(&value).unwrap(), b"d3:bar4:spam3:fooi42ee");
//! ```
//!
//! ## Modules
//!
//! - [`decoder`]: bytes → [`Value`], with [`DecodeOptions`] for leniency
//! - [`encoder`]: [`Value`] → canonical bytes
//! - [`value`]: the [`Value`] tree and [`ByteString`] (text or raw bytes)
//! - [`key`]: placeholder strings for non-UTF-8 dictionary keys
//! - [`json`]: JSON rendering and JSON → Bencode conversion
//! - [`utf8`]: strict UTF-8 classification
//! - [`error`]: Error types for decode/encode failures

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod key;
pub mod utf8;
pub mod value;

pub use decoder::{decode, DecodeOptions, Decoder, TrailingPolicy, TruncationPolicy};
pub use encoder::{encode, encode_to};
pub use error::BencodeError;
pub use json::{encode_json, from_json, to_json_string};
pub use key::{decode_key, encode_key, is_placeholder_key};
pub use utf8::is_valid_utf8;
pub use value::{ByteString, Value};
