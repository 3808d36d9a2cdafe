//! Bencode encoder: a [`Value`] tree into canonical bytes.
//!
//! Output is canonical: the same value always produces the same bytes, which is
//! what info-hash computation relies on.
//!
//! - **Integers**: `i<decimal>e`, no leading zeros, zero is `i0e`
//! - **Byte strings**: `<len>:<payload>`, where `len` counts payload bytes and
//!   the payload is written verbatim (text and raw bytes alike)
//! - **Lists**: `l<items>e` in original order
//! - **Dictionaries**: `d<key><value>...e` with keys in byte-lexicographic order
//!
//! # Example
//! ```
//! use bencode_core::{encode, ByteString, Value};
//! use std::collections::BTreeMap;
//!
//! let mut dict = BTreeMap::new();
//! dict.insert(ByteString::from("b"), Value::Integer(2));
//! dict.insert(ByteString::from("a"), Value::Integer(1));
//! assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:ai1e1:bi2ee");
//! ```

use crate::error::Result;
use crate::value::{ByteString, Value};
use std::io::Write;
use tracing::trace;

/// Encode a value into a new byte vector.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf)?;
    Ok(buf)
}

/// Encode a value into any writer. Writer failures surface as
/// [`BencodeError::Io`](crate::BencodeError::Io).
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> Result<()> {
    match value {
        Value::Integer(i) => {
            write!(writer, "i{}e", i)?;
        }
        Value::ByteString(b) => {
            encode_byte_string(b, writer)?;
        }
        Value::List(list) => {
            writer.write_all(b"l")?;
            for item in list {
                encode_to(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Value::Dict(dict) => {
            trace!(entries = dict.len(), "encoding dict");
            writer.write_all(b"d")?;
            // BTreeMap<ByteString, _> iterates by raw key bytes.
            for (key, val) in dict {
                encode_byte_string(key, writer)?;
                encode_to(val, writer)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}

fn encode_byte_string<W: Write>(b: &ByteString, writer: &mut W) -> Result<()> {
    let payload = b.as_bytes();
    write!(writer, "{}:", payload.len())?;
    writer.write_all(payload)?;
    Ok(())
}
