use thiserror::Error;

/// Errors produced while decoding bencode.
///
/// Every variant carries the byte offset into the input at which the problem
/// was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    /// The input ended in the middle of a value.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// An integer token is empty, has leading zeros, is `-0`, contains a
    /// non-digit, or does not fit in an `i64`.
    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger { offset: usize, reason: &'static str },

    /// The input does not follow the bencode grammar.
    #[error("malformed input at offset {offset}: {reason}")]
    MalformedInput { offset: usize, reason: &'static str },

    /// A dictionary contains the same key twice.
    #[error("duplicate dictionary key {key:?} at offset {offset}")]
    DuplicateKey { offset: usize, key: String },

    /// A dictionary key is not a byte string.
    #[error("dictionary key at offset {offset} is not a byte string")]
    InvalidDictionaryKey { offset: usize },

    #[error("nesting too deep at offset {offset}")]
    NestingTooDeep { offset: usize },
}

impl BencodeError {
    /// Byte offset into the input where decoding failed.
    pub fn offset(&self) -> usize {
        match self {
            BencodeError::UnexpectedEnd { offset }
            | BencodeError::InvalidInteger { offset, .. }
            | BencodeError::MalformedInput { offset, .. }
            | BencodeError::DuplicateKey { offset, .. }
            | BencodeError::InvalidDictionaryKey { offset }
            | BencodeError::NestingTooDeep { offset } => *offset,
        }
    }
}
