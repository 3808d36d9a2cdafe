//! The Bencode value tree.
//!
//! Bencode has four kinds of values: integers, byte strings, lists and
//! dictionaries. Byte strings are split into text and raw variants so that
//! callers can tell a human-readable `announce` URL apart from a binary
//! `pieces` blob, while both keep every original byte.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A Bencode byte string, classified as text or raw bytes.
///
/// The classification is presentational: equality, ordering and hashing all
/// compare the underlying bytes, so `Text("a")` and `Raw(b"a")` are the same
/// dictionary key and sort by byte-lexicographic order.
#[derive(Clone)]
pub enum ByteString {
    /// Strictly valid UTF-8 payload.
    Text(String),
    /// Payload that is not valid UTF-8 (or was explicitly built as raw).
    Raw(Vec<u8>),
}

impl ByteString {
    /// Classifies `bytes` as text if they are strictly valid UTF-8, raw otherwise.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => ByteString::Text(text),
            Err(e) => ByteString::Raw(e.into_bytes()),
        }
    }

    /// Builds a raw byte string without attempting text classification.
    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        ByteString::Raw(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ByteString::Text(s) => s.as_bytes(),
            ByteString::Raw(b) => b,
        }
    }

    /// The text form, if the payload is valid UTF-8.
    ///
    /// A `Raw` value built from valid UTF-8 bytes still yields its text here;
    /// only the bytes matter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ByteString::Text(s) => Some(s),
            ByteString::Raw(b) => std::str::from_utf8(b).ok(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ByteString::Text(_))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            ByteString::Text(s) => s.into_bytes(),
            ByteString::Raw(b) => b,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl PartialEq for ByteString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for ByteString {}

impl PartialOrd for ByteString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for ByteString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

// Lets `BTreeMap<ByteString, _>` be queried with a plain `&[u8]`.
impl Borrow<[u8]> for ByteString {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteString::Text(s) => f.debug_tuple("Text").field(s).finish(),
            ByteString::Raw(b) => f.debug_tuple("Raw").field(b).finish(),
        }
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        ByteString::Text(s.to_string())
    }
}

impl From<String> for ByteString {
    fn from(s: String) -> Self {
        ByteString::Text(s)
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString::from_bytes(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        ByteString::from_bytes(bytes.to_vec())
    }
}

/// A decoded or encodable Bencode value.
///
/// # Examples
///
/// ```
/// use bencode_core::{decode, Value};
///
/// let value = decode(b"d8:announce15:http://tracker/4:infod6:lengthi42eee").unwrap();
/// assert_eq!(value.get(b"announce").and_then(Value::as_str), Some("http://tracker/"));
/// assert_eq!(
///     value.get(b"info").and_then(|info| info.get(b"length")).and_then(Value::as_integer),
///     Some(42)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// A byte string, either text or raw bytes.
    ByteString(ByteString),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary. Keys iterate in byte-lexicographic order, which is the
    /// order the encoder emits them in.
    Dict(BTreeMap<ByteString, Value>),
}

impl Value {
    /// Text byte string.
    pub fn text(s: impl Into<String>) -> Self {
        Value::ByteString(ByteString::Text(s.into()))
    }

    /// Raw byte string, kept raw even if the bytes happen to be valid UTF-8.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::ByteString(ByteString::raw(bytes))
    }

    /// Human-readable name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::ByteString(_) => "byte string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_byte_string(&self) -> bool {
        matches!(self, Value::ByteString(_))
    }

    /// `true` only for byte strings classified as text.
    pub fn is_text(&self) -> bool {
        matches!(self, Value::ByteString(ByteString::Text(_)))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The byte string as text, if it is one and its bytes are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::ByteString(b) => b.as_str(),
            _ => None,
        }
    }

    /// The raw payload of a byte string, whichever way it was classified.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteString(b) => Some(b.as_bytes()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<ByteString, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    pub fn into_dict(self) -> Option<BTreeMap<ByteString, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

/// Classifies the bytes the same way the decoder does.
impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::ByteString(ByteString::from_bytes(bytes))
    }
}

impl From<ByteString> for Value {
    fn from(b: ByteString) -> Self {
        Value::ByteString(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<BTreeMap<ByteString, Value>> for Value {
    fn from(d: BTreeMap<ByteString, Value>) -> Self {
        Value::Dict(d)
    }
}
