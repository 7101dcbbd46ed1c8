use super::error::MetainfoError;
use crate::bencode::ByteSpan;
use serde::{Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;

/// The SHA-1 digest of a torrent's info dictionary.
///
/// The digest is always taken over the info dictionary's bytes exactly as
/// they appear in the source file, so it matches what any other client
/// computes for the same file even when the file is not canonically encoded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    pub const LEN: usize = 20;

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Hashes `original[span]`.
    ///
    /// Returns `None` when the span does not lie inside `original`.
    ///
    /// ```
    /// use torinfo::bencode::decode_spanned;
    /// use torinfo::metainfo::InfoHash;
    ///
    /// let data = b"d4:infod6:lengthi10e4:name5:a.txtee";
    /// let span = decode_spanned(data).unwrap().get(b"info").unwrap().span();
    /// let hash = InfoHash::compute(data, span).unwrap();
    /// assert_eq!(hash, InfoHash::from_info_bytes(b"d6:lengthi10e4:name5:a.txte"));
    /// ```
    pub fn compute(original: &[u8], span: ByteSpan) -> Option<Self> {
        span.slice(original).map(Self::from_info_bytes)
    }

    /// Hashes an already extracted info dictionary.
    pub fn from_info_bytes(raw_info: &[u8]) -> Self {
        Self(Sha1::digest(raw_info).into())
    }

    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| MetainfoError::InvalidInfoHash(s.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex, the form used in magnet links and by most clients.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// RFC 4648 base32 without padding (32 characters).
    pub fn to_base32(&self) -> String {
        base32_encode(&self.0)
    }
}

impl From<[u8; 20]> for InfoHash {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl FromStr for InfoHash {
    type Err = MetainfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for InfoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

fn base32_encode(input: &[u8]) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

    let mut output = String::with_capacity(input.len().div_ceil(5) * 8);
    let mut buffer: u16 = 0;
    let mut bits_in_buffer = 0;

    for &byte in input {
        buffer = (buffer << 8) | u16::from(byte);
        bits_in_buffer += 8;

        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = (buffer >> bits_in_buffer) & 0x1f;
            output.push(ALPHABET[usize::from(idx)] as char);
        }
        buffer &= (1 << bits_in_buffer) - 1;
    }

    if bits_in_buffer > 0 {
        let idx = (buffer << (5 - bits_in_buffer)) & 0x1f;
        output.push(ALPHABET[usize::from(idx)] as char);
    }

    output
}
