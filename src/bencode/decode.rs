use super::error::BencodeError;
use super::span::{ByteSpan, Decoded, SpanNode};
use super::value::{Dict, Value};
use bytes::Bytes;

const MAX_DEPTH: usize = 64;

/// Decodes a buffer holding exactly one bencode value.
///
/// Bytes left over after the value are an error; use [`decode_prefix`] to
/// accept them.
///
/// ```
/// use torinfo::bencode::{decode, BencodeError};
///
/// assert_eq!(decode(b"i42e").unwrap().as_integer(), Some(42));
/// assert!(matches!(decode(b"i42eXX"), Err(BencodeError::MalformedInput { offset: 4, .. })));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let (value, consumed) = decode_prefix(data)?;

    if consumed != data.len() {
        return Err(BencodeError::MalformedInput {
            offset: consumed,
            reason: "trailing data after value",
        });
    }

    Ok(value)
}

/// Decodes the first bencode value in `data` and returns it together with the
/// number of bytes it occupied.
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    let mut decoder = Decoder::new(data, false);
    let (value, _) = decoder.value(0)?;
    Ok((value, decoder.pos))
}

/// Decodes the first bencode value in `data`, recording the byte span of every
/// nested value.
///
/// Dictionary key order is not checked, so the spans of real-world files with
/// unsorted keys still replay their original bytes.
pub fn decode_spanned(data: &[u8]) -> Result<Decoded<'_>, BencodeError> {
    let mut decoder = Decoder::new(data, true);
    let (value, spans) = decoder.value(0)?;
    Ok(Decoded::new(data, value, spans))
}

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    track_spans: bool,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], track_spans: bool) -> Self {
        Self {
            data,
            pos: 0,
            track_spans,
        }
    }

    fn peek(&self) -> Result<u8, BencodeError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::UnexpectedEnd { offset: self.pos })
    }

    fn skip_digits(&mut self) {
        while matches!(self.data.get(self.pos), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn value(&mut self, depth: usize) -> Result<(Value, SpanNode), BencodeError> {
        if depth >= MAX_DEPTH {
            return Err(BencodeError::NestingTooDeep { offset: self.pos });
        }

        let start = self.pos;
        let (value, children) = match self.peek()? {
            b'i' => (self.integer()?, Vec::new()),
            b'l' => self.list(depth)?,
            b'd' => self.dict(depth)?,
            b'0'..=b'9' => (Value::Bytes(self.byte_string()?), Vec::new()),
            _ => {
                return Err(BencodeError::MalformedInput {
                    offset: start,
                    reason: "expected 'i', 'l', 'd' or a string length",
                })
            }
        };

        let node = SpanNode {
            span: ByteSpan::new(start, self.pos),
            children,
        };
        Ok((value, node))
    }

    fn integer(&mut self) -> Result<Value, BencodeError> {
        let start = self.pos;
        self.pos += 1;

        let negative = self.data.get(self.pos) == Some(&b'-');
        if negative {
            self.pos += 1;
        }

        let data = self.data;
        let digits_start = self.pos;
        self.skip_digits();
        let digits = &data[digits_start..self.pos];

        match self.peek()? {
            b'e' => {}
            _ => {
                return Err(BencodeError::InvalidInteger {
                    offset: self.pos,
                    reason: "non-digit character",
                })
            }
        }

        let invalid = |reason: &'static str| BencodeError::InvalidInteger {
            offset: start,
            reason,
        };

        if digits.is_empty() {
            return Err(invalid("no digits"));
        }
        if digits[0] == b'0' && negative {
            return Err(invalid("negative zero"));
        }
        if digits[0] == b'0' && digits.len() > 1 {
            return Err(invalid("leading zeros"));
        }

        // Accumulate towards the sign so i64::MIN parses.
        let value = digits.iter().try_fold(0i64, |acc, &d| {
            let d = i64::from(d - b'0');
            let acc = acc.checked_mul(10)?;
            if negative {
                acc.checked_sub(d)
            } else {
                acc.checked_add(d)
            }
        });
        let value = value.ok_or_else(|| invalid("out of range for i64"))?;

        self.pos += 1;
        Ok(Value::Integer(value))
    }

    fn byte_string(&mut self) -> Result<Bytes, BencodeError> {
        let data = self.data;
        let start = self.pos;
        self.skip_digits();
        let digits = &data[start..self.pos];

        match self.peek()? {
            b':' => {}
            _ => {
                return Err(BencodeError::MalformedInput {
                    offset: self.pos,
                    reason: "expected ':' after string length",
                })
            }
        }

        if digits.len() > 1 && digits[0] == b'0' {
            return Err(BencodeError::MalformedInput {
                offset: start,
                reason: "string length has leading zeros",
            });
        }

        self.pos += 1;

        // A length too large for usize cannot fit in the buffer either.
        let end = digits
            .iter()
            .try_fold(0usize, |acc, &d| {
                acc.checked_mul(10)?.checked_add(usize::from(d - b'0'))
            })
            .and_then(|len| self.pos.checked_add(len))
            .filter(|&end| end <= data.len())
            .ok_or(BencodeError::UnexpectedEnd { offset: data.len() })?;

        let bytes = Bytes::copy_from_slice(&data[self.pos..end]);
        self.pos = end;
        Ok(bytes)
    }

    fn list(&mut self, depth: usize) -> Result<(Value, Vec<SpanNode>), BencodeError> {
        self.pos += 1;
        let mut items = Vec::new();
        let mut spans = Vec::new();

        while self.peek()? != b'e' {
            let (item, span) = self.value(depth + 1)?;
            items.push(item);
            if self.track_spans {
                spans.push(span);
            }
        }

        self.pos += 1;
        Ok((Value::List(items), spans))
    }

    fn dict(&mut self, depth: usize) -> Result<(Value, Vec<SpanNode>), BencodeError> {
        self.pos += 1;
        let mut dict = Dict::new();
        let mut spans = Vec::new();

        loop {
            let key_start = self.pos;
            match self.peek()? {
                b'e' => break,
                b'0'..=b'9' => {}
                b'i' | b'l' | b'd' => {
                    return Err(BencodeError::InvalidDictionaryKey { offset: key_start })
                }
                _ => {
                    return Err(BencodeError::MalformedInput {
                        offset: key_start,
                        reason: "expected a dictionary key or 'e'",
                    })
                }
            }

            let key = self.byte_string()?;
            if dict.contains_key(&key) {
                return Err(BencodeError::DuplicateKey {
                    offset: key_start,
                    key: String::from_utf8_lossy(&key).into_owned(),
                });
            }

            let (value, span) = self.value(depth + 1)?;
            dict.insert(key, value);
            if self.track_spans {
                spans.push(span);
            }
        }

        self.pos += 1;
        Ok((Value::Dict(dict), spans))
    }
}
