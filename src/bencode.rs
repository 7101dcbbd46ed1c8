//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format of `.torrent` files.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Decoding
//!
//! Three entry points share one recursive-descent decoder:
//!
//! - [`decode`] expects the buffer to hold exactly one value.
//! - [`decode_prefix`] decodes the first value and reports how many bytes it used.
//! - [`decode_spanned`] also records the [`ByteSpan`] of every nested value, so
//!   the original encoding of any sub-value can be replayed without
//!   re-serializing it.
//!
//! Decoding is strict about the grammar (no leading zeros, no `-0`, unique
//! dictionary keys) but permissive about dictionary key order, which many
//! real-world files get wrong.
//!
//! ```
//! use torinfo::bencode::{decode, decode_prefix, Value};
//!
//! let value = decode(b"l4:spami42ee").unwrap();
//! assert_eq!(value.as_list().map(|l| l.len()), Some(2));
//!
//! let (value, used) = decode_prefix(b"d3:foo3:bare\n").unwrap();
//! assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
//! assert_eq!(used, 12);
//! ```
//!
//! # Encoding
//!
//! [`encode`] always produces the canonical form: dictionary keys sorted by
//! raw bytes, minimal integers.
//!
//! ```
//! use torinfo::bencode::{decode, encode};
//!
//! let unsorted = b"d1:bi2e1:ai1ee";
//! assert_eq!(encode(&decode(unsorted).unwrap()), b"d1:ai1e1:bi2ee");
//! ```
//!
//! # Error Handling
//!
//! - [`BencodeError::UnexpectedEnd`] - Input ended in the middle of a value
//! - [`BencodeError::InvalidInteger`] - Malformed integer (e.g., leading zeros)
//! - [`BencodeError::MalformedInput`] - Grammar violation or trailing data
//! - [`BencodeError::DuplicateKey`] - A dictionary repeats a key
//! - [`BencodeError::InvalidDictionaryKey`] - A dictionary key is not a byte string
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (max 64 levels)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod span;
mod value;

pub use decode::{decode, decode_prefix, decode_spanned};
pub use encode::{encode, encode_into};
pub use error::BencodeError;
pub use span::{ByteSpan, Decoded, Spanned};
pub use value::{Dict, Value};

#[cfg(test)]
mod tests;
