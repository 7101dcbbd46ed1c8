//! torinfo - read the metadata of BitTorrent metainfo files
//!
//! Decodes a `.torrent` file with a from-scratch bencode implementation,
//! builds a typed record of what it describes, and derives the torrent's
//! info hash and magnet link.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding with byte-span tracking
//! - [`metainfo`] - Torrent metadata model, info hash, magnet links
//! - [`report`] - Plain-text and JSON views of the metadata
//!
//! ```
//! use torinfo::TorrentMetadata;
//!
//! let torrent = TorrentMetadata::from_bytes(b"d4:infod6:lengthi10e4:name5:a.txtee").unwrap();
//! assert_eq!(
//!     torrent.magnet_link().to_uri(),
//!     "magnet:?xt=urn:btih:afc1458d900e751334516880208924a26b2b6dc4&dn=a.txt"
//! );
//! ```

pub mod bencode;
pub mod metainfo;
pub mod report;

pub use bencode::{decode, decode_prefix, decode_spanned, encode, BencodeError, ByteSpan, Value};
pub use metainfo::{FileEntry, InfoHash, MagnetLink, MetainfoError, TorrentMetadata};
pub use report::{Field, Report};
