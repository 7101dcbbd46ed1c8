use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when building torrent metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetainfoError {
    /// The torrent file contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// A required field is missing from the torrent file.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field is present but holds the wrong kind of value.
    #[error("invalid field {field}: expected {expected}, found {found}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The file lengths add up to more than `i64::MAX` bytes.
    #[error("total size overflows a 64-bit integer")]
    SizeOverflow,

    /// A hex info hash is not 40 hex digits.
    #[error("invalid info hash: {0:?}")]
    InvalidInfoHash(String),
}
