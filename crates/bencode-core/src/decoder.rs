//! Bencode decoder: bytes into a [`Value`] tree.
//!
//! A recursive-descent parser driven by a single forward cursor. The dispatch
//! byte of each value selects its kind:
//!
//! - `i` → integer, read up to the closing `e`
//! - `l` → list, values until a closing `e`
//! - `d` → dictionary, byte-string keys each followed by a value, until `e`
//! - anything else → byte string; the byte is the first digit of the length
//!   prefix, so it is left in place for the byte-string parser
//!
//! # Key design decisions
//!
//! - **Cursor per call**: the position lives in a [`Cursor`] built inside each
//!   `decode` call and threaded through the recursion by `&mut`. A [`Decoder`]
//!   holds only its options, so one instance can be shared across threads.
//! - **Text vs raw bytes**: byte-string payloads become
//!   [`ByteString::Text`] only when they are strictly valid UTF-8.
//! - **Unsorted input is fine**: dictionary keys are inserted in whatever order
//!   they arrive; canonical ordering is the encoder's job.
//! - **Explicit leniency**: truncation inside containers and trailing bytes
//!   after the value are governed by [`DecodeOptions`].

use crate::error::{BencodeError, Result};
use crate::utf8;
use crate::value::{ByteString, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Default nesting limit for lists and dictionaries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What to do when the input ends before a list or dictionary is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationPolicy {
    /// Fail with [`BencodeError::Truncated`].
    #[default]
    Strict,
    /// Return the elements parsed so far as if the container had been closed.
    Lenient,
}

/// What to do with bytes left over after the top-level value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingPolicy {
    #[default]
    Ignore,
    /// Fail with [`BencodeError::TrailingData`].
    Reject,
}

/// Knobs for [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub truncation: TruncationPolicy,
    pub trailing: TrailingPolicy,
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            truncation: TruncationPolicy::Strict,
            trailing: TrailingPolicy::Ignore,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    pub fn with_truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn with_trailing(mut self, trailing: TrailingPolicy) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decode a Bencode byte buffer with the default options.
///
/// Parses exactly one value starting at the first byte. Bytes after that value
/// are ignored; use [`Decoder`] with [`TrailingPolicy::Reject`] to refuse them.
///
/// # Examples
///
/// ```
/// use bencode_core::{decode, Value};
///
/// assert_eq!(decode(b"i-123e").unwrap(), Value::Integer(-123));
/// assert_eq!(decode(b"5:hello").unwrap(), Value::text("hello"));
/// assert_eq!(
///     decode(b"li1ei2ei3ee").unwrap(),
///     Value::List(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)])
/// );
/// ```
pub fn decode(data: &[u8]) -> Result<Value> {
    Decoder::default().decode(data)
}

/// A reusable, stateless Bencode decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode one value from `data`, applying the trailing-data policy.
    pub fn decode(&self, data: &[u8]) -> Result<Value> {
        let (value, consumed) = self.decode_prefix(data)?;
        if consumed < data.len() {
            match self.options.trailing {
                TrailingPolicy::Reject => {
                    return Err(BencodeError::TrailingData { position: consumed });
                }
                TrailingPolicy::Ignore => {
                    debug!(
                        consumed,
                        trailing = data.len() - consumed,
                        "ignoring bytes after top-level value"
                    );
                }
            }
        }
        Ok(value)
    }

    /// Decode the value at the start of `data` and report how many bytes it
    /// occupied. Trailing bytes are never an error here.
    pub fn decode_prefix(&self, data: &[u8]) -> Result<(Value, usize)> {
        let mut cursor = Cursor::new(data);
        let value = self.parse_value(&mut cursor, 0)?;
        Ok((value, cursor.pos))
    }

    fn parse_value(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Value> {
        let start = cursor.pos;
        if depth > self.options.max_depth {
            return Err(BencodeError::NestingTooDeep {
                position: start,
                limit: self.options.max_depth,
            });
        }

        let head = cursor.peek().ok_or_else(|| BencodeError::Truncated {
            position: start,
            expected: "a value".to_string(),
        })?;

        match head {
            b'i' => {
                cursor.advance(1);
                trace!(position = start, "parsing integer");
                parse_integer(cursor, start).map(Value::Integer)
            }
            b'l' => {
                cursor.advance(1);
                trace!(position = start, depth, "parsing list");
                self.parse_list(cursor, depth)
            }
            b'd' => {
                cursor.advance(1);
                trace!(position = start, depth, "parsing dict");
                self.parse_dict(cursor, depth)
            }
            _ => {
                trace!(position = start, "parsing byte string");
                parse_byte_string(cursor).map(Value::ByteString)
            }
        }
    }

    fn parse_list(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Value> {
        let mut list = Vec::new();
        loop {
            match cursor.peek() {
                Some(b'e') => {
                    cursor.advance(1);
                    break;
                }
                Some(_) => list.push(self.parse_value(cursor, depth + 1)?),
                None => {
                    self.unterminated(cursor, "list", list.len())?;
                    break;
                }
            }
        }
        Ok(Value::List(list))
    }

    fn parse_dict(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Value> {
        let mut dict = BTreeMap::new();
        loop {
            match cursor.peek() {
                Some(b'e') => {
                    cursor.advance(1);
                    break;
                }
                Some(_) => {
                    let key = parse_byte_string(cursor)?;
                    let value = self.parse_value(cursor, depth + 1)?;
                    if let Some(previous) = dict.insert(key, value) {
                        debug!(
                            position = cursor.pos,
                            replaced = previous.kind(),
                            "duplicate dict key, keeping the last value"
                        );
                    }
                }
                None => {
                    self.unterminated(cursor, "dict", dict.len())?;
                    break;
                }
            }
        }
        Ok(Value::Dict(dict))
    }

    /// End of input inside a container: an error unless truncation is lenient.
    fn unterminated(&self, cursor: &Cursor<'_>, container: &str, parsed: usize) -> Result<()> {
        match self.options.truncation {
            TruncationPolicy::Strict => Err(BencodeError::Truncated {
                position: cursor.pos,
                expected: format!("'e' to close {}", container),
            }),
            TruncationPolicy::Lenient => {
                debug!(
                    position = cursor.pos,
                    container, parsed, "input ended inside container, returning partial value"
                );
                Ok(())
            }
        }
    }
}

/// Parse the body of `i...e`; the cursor sits just past the `i`.
fn parse_integer(cursor: &mut Cursor<'_>, start: usize) -> Result<i64> {
    let span = cursor
        .read_until(b'e')
        .ok_or_else(|| BencodeError::Truncated {
            position: cursor.pos,
            expected: "'e' to close integer".to_string(),
        })?;

    let malformed = |message: &str| BencodeError::MalformedInteger {
        position: start,
        message: format!("{} in {:?}", message, String::from_utf8_lossy(span)),
    };

    let digits = span.strip_prefix(b"-").unwrap_or(span);
    let negative = digits.len() != span.len();

    if digits.is_empty() {
        return Err(malformed("no digits"));
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(malformed("non-digit character"));
    }
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(malformed("leading zero"));
    }
    if negative && digits == b"0" {
        return Err(malformed("negative zero"));
    }

    // All ASCII by now, so the lossy conversion is exact.
    let literal = String::from_utf8_lossy(span);
    match literal.parse::<i64>() {
        Ok(n) => Ok(n),
        Err(_) => Err(BencodeError::IntegerOverflow {
            literal: literal.into_owned(),
        }),
    }
}

/// Parse `<len>:<payload>`; the cursor sits on the first length digit.
fn parse_byte_string(cursor: &mut Cursor<'_>) -> Result<ByteString> {
    let start = cursor.pos;
    loop {
        match cursor.next_byte() {
            Some(b':') => break,
            Some(b) if b.is_ascii_digit() => {}
            Some(b) => {
                return Err(BencodeError::MalformedLength {
                    position: cursor.pos - 1,
                    message: format!("unexpected byte 0x{:02x} in length prefix", b),
                });
            }
            None => {
                return Err(BencodeError::Truncated {
                    position: cursor.pos,
                    expected: "':' after byte string length".to_string(),
                });
            }
        }
    }

    let digits = cursor.slice(start, cursor.pos - 1);
    if digits.is_empty() {
        return Err(BencodeError::MalformedLength {
            position: start,
            message: "empty length prefix".to_string(),
        });
    }
    let len: usize = String::from_utf8_lossy(digits)
        .parse()
        .map_err(|_| BencodeError::MalformedLength {
            position: start,
            message: "length does not fit in memory".to_string(),
        })?;

    let remaining = cursor.remaining();
    let payload = cursor.take(len).ok_or_else(|| BencodeError::Truncated {
        position: cursor.pos,
        expected: format!("{} payload bytes, {} remain", len, remaining),
    })?;

    Ok(utf8::classify(payload))
}

/// Read position into the input of a single decode call.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn slice(&self, from: usize, to: usize) -> &'a [u8] {
        &self.data[from..to]
    }

    /// Take exactly `n` bytes, or nothing if fewer remain.
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    /// Bytes up to (not including) `stop`; the stop byte itself is consumed.
    /// Leaves the cursor untouched when `stop` never appears.
    fn read_until(&mut self, stop: u8) -> Option<&'a [u8]> {
        let offset = self.data[self.pos..].iter().position(|&b| b == stop)?;
        let bytes = &self.data[self.pos..self.pos + offset];
        self.pos += offset + 1;
        Some(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_read_until_consumes_stop_byte() {
        let mut cursor = Cursor::new(b"123e4");
        assert_eq!(cursor.read_until(b'e'), Some(&b"123"[..]));
        assert_eq!(cursor.pos, 4);
        assert_eq!(cursor.read_until(b'e'), None);
        assert_eq!(cursor.pos, 4);
    }

    #[test]
    fn cursor_take_refuses_overrun() {
        let mut cursor = Cursor::new(b"abc");
        assert_eq!(cursor.take(4), None);
        assert_eq!(cursor.take(2), Some(&b"ab"[..]));
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn decoder_is_reusable_across_calls() {
        let decoder = Decoder::default();
        assert_eq!(decoder.decode(b"i1e").unwrap(), Value::Integer(1));
        // A failed call leaves nothing behind for the next one.
        assert!(decoder.decode(b"l5:abc").is_err());
        assert_eq!(decoder.decode(b"i2e").unwrap(), Value::Integer(2));
    }

    #[test]
    fn decoder_is_shareable_across_threads() {
        let decoder = Decoder::default();
        std::thread::scope(|scope| {
            for n in 0..4i64 {
                scope.spawn(move || {
                    let input = format!("li{}e4:spame", n);
                    let value = decoder.decode(input.as_bytes()).unwrap();
                    assert_eq!(value.as_list().unwrap()[0], Value::Integer(n));
                });
            }
        });
    }
}
