//! JSON carrier for Bencode values.
//!
//! JSON is how decoded torrents are shown to humans and how hand-written
//! structures are fed to the encoder. The mapping:
//!
//! | Bencode | JSON |
//! |---------|------|
//! | integer | number |
//! | text byte string | string |
//! | raw byte string | array of byte values (`[170,244,...]`) |
//! | list | array |
//! | dict | object; non-UTF-8 keys as `ByteArray[...]` placeholders (see [`crate::key`]) |
//!
//! Going back, JSON `null`, booleans and non-integral numbers have no Bencode
//! counterpart and are rejected with [`BencodeError::UnsupportedType`]. Raw byte
//! strings rendered as arrays come back as lists of integers; placeholder keys
//! of non-UTF-8 bytes come back as the original raw bytes.

use crate::encoder::encode;
use crate::error::{BencodeError, Result};
use crate::key::{encode_key, key_from_string};
use crate::value::{ByteString, Value};
use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};
use std::collections::BTreeMap;

impl Serialize for ByteString {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ByteString::Text(s) => serializer.serialize_str(s),
            ByteString::Raw(bytes) => serializer.collect_seq(bytes),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::ByteString(b) => b.serialize(serializer),
            Value::List(list) => serializer.collect_seq(list),
            Value::Dict(dict) => {
                serializer.collect_map(dict.iter().map(|(k, v)| (encode_key(k.as_bytes()), v)))
            }
        }
    }
}

/// Render a value as JSON text, two-space indented when `pretty` is set.
///
/// ```
/// use bencode_core::{decode, to_json_string};
///
/// let value = decode(b"d3:bar4:spam3:fooi42ee").unwrap();
/// assert_eq!(to_json_string(&value, false).unwrap(), r#"{"bar":"spam","foo":42}"#);
/// ```
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Convert a JSON value into a Bencode value.
pub fn from_json(json: JsonValue) -> Result<Value> {
    match json {
        JsonValue::Number(n) => number_to_integer(&n).map(Value::Integer),
        JsonValue::String(s) => Ok(Value::text(s)),
        JsonValue::Array(items) => items
            .into_iter()
            .map(from_json)
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        JsonValue::Object(map) => {
            let mut dict = BTreeMap::new();
            for (key, val) in map {
                let key = key_from_string(key);
                if dict.contains_key(&key) {
                    return Err(BencodeError::DuplicateKey(encode_key(key.as_bytes())));
                }
                dict.insert(key, from_json(val)?);
            }
            Ok(Value::Dict(dict))
        }
        JsonValue::Null => Err(BencodeError::UnsupportedType("null".to_string())),
        JsonValue::Bool(_) => Err(BencodeError::UnsupportedType("boolean".to_string())),
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = BencodeError;

    fn try_from(json: JsonValue) -> Result<Self> {
        from_json(json)
    }
}

/// Parse a JSON string and encode it as canonical Bencode.
///
/// ```
/// use bencode_core::encode_json;
///
/// assert_eq!(encode_json(r#"{"b":2,"a":1}"#).unwrap(), b"d1:ai1e1:bi2ee");
/// assert!(encode_json("1.23").unwrap_err().to_string().contains("unsupported data type"));
/// ```
pub fn encode_json(json: &str) -> Result<Vec<u8>> {
    let parsed: JsonValue = serde_json::from_str(json)?;
    encode(&from_json(parsed)?)
}

/// Integral JSON numbers only. `1.0` is accepted as `1`.
fn number_to_integer(n: &Number) -> Result<i64> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    if n.is_u64() {
        return Err(BencodeError::IntegerOverflow {
            literal: n.to_string(),
        });
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 => {
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Ok(f as i64)
            } else {
                Err(BencodeError::IntegerOverflow {
                    literal: n.to_string(),
                })
            }
        }
        _ => Err(BencodeError::UnsupportedType("float".to_string())),
    }
}
