//! Torrent metainfo handling ([BEP-3]).
//!
//! Turns the bytes of a `.torrent` file into a [`TorrentMetadata`] record and
//! derives the torrent's [`InfoHash`] and [`MagnetLink`] from it.
//!
//! # Examples
//!
//! ## Parsing a torrent file
//!
//! ```no_run
//! use torinfo::metainfo::TorrentMetadata;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("example.torrent")?;
//! let torrent = TorrentMetadata::from_bytes(&data)?;
//!
//! println!("Name: {}", torrent.name);
//! println!("Info hash: {}", torrent.info_hash);
//! println!("Total size: {} bytes", torrent.total_length);
//!
//! for file in &torrent.files {
//!     println!("  {} ({} bytes)", file.display_path(), file.length);
//! }
//!
//! println!("Magnet: {}", torrent.magnet_link());
//! # Ok(())
//! # }
//! ```
//!
//! ## Computing an info hash by hand
//!
//! The info hash covers the `info` dictionary's bytes as they appear in the
//! file. Re-encoding the decoded dictionary would sort its keys and could
//! change the hash, so the span recorded by the decoder is hashed instead.
//!
//! ```
//! use torinfo::bencode::{decode_spanned, encode};
//! use torinfo::metainfo::InfoHash;
//!
//! // `name` sorts after `length`, so this info dictionary is not canonical.
//! let data = b"d4:infod4:name5:a.txt6:lengthi10eee";
//! let decoded = decode_spanned(data).unwrap();
//! let info = decoded.get(b"info").unwrap();
//!
//! let hash = InfoHash::compute(data, info.span()).unwrap();
//! assert_eq!(hash, InfoHash::from_info_bytes(b"d4:name5:a.txt6:lengthi10ee"));
//! assert_ne!(hash, InfoHash::from_info_bytes(&encode(info.value())));
//! ```
//!
//! # Torrent Structure
//!
//! - **info** - Core torrent metadata (hashed to create the info hash)
//!   - `name` - Suggested file/directory name
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA1 hashes of each piece
//!   - `length` - Total size (single-file) OR `files` list (multi-file)
//! - **announce** - Primary tracker URL
//! - **announce-list** - Additional tracker tiers (BEP-12)
//! - **url-list** - Web seeds (BEP-19)
//! - **creation date** - Unix timestamp when created
//! - **comment** - Optional comment
//! - **created by** - Client that created the torrent
//! - **encoding** - Character set of the text fields
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod error;
mod info_hash;
mod magnet;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use magnet::{build_magnet, HashEncoding, MagnetLink};
pub use torrent::{FileEntry, TorrentMetadata};
