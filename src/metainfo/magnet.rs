use super::info_hash::InfoHash;
use std::fmt;

/// How the info hash is spelled in the `xt` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashEncoding {
    /// 40 lowercase hex digits.
    #[default]
    Hex,
    /// 32 uppercase base32 characters.
    Base32,
}

/// A magnet URI for a v1 torrent.
///
/// Derived from an info hash and, optionally, a display name and tracker
/// list. Nothing here is stored alongside the metadata; build one whenever
/// the URI is needed.
///
/// ```
/// use torinfo::metainfo::{InfoHash, MagnetLink};
///
/// let hash = InfoHash::from_hex("c12fe1c06bba254a9dc9f519b335aa7c1367a88a").unwrap();
/// let magnet = MagnetLink::new(hash, "Example File");
/// assert_eq!(
///     magnet.to_uri(),
///     "magnet:?xt=urn:btih:c12fe1c06bba254a9dc9f519b335aa7c1367a88a&dn=Example%20File"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLink {
    pub info_hash: InfoHash,
    pub display_name: Option<String>,
    pub trackers: Vec<String>,
}

impl MagnetLink {
    pub fn new(info_hash: InfoHash, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            info_hash,
            display_name: (!display_name.is_empty()).then_some(display_name),
            trackers: Vec::new(),
        }
    }

    /// Adds trackers, skipping empty and repeated URLs.
    pub fn with_trackers<I, S>(mut self, trackers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tracker in trackers {
            let tracker = tracker.into();
            if !tracker.is_empty() && !self.trackers.contains(&tracker) {
                self.trackers.push(tracker);
            }
        }
        self
    }

    pub fn to_uri(&self) -> String {
        self.to_uri_with(HashEncoding::Hex)
    }

    /// `magnet:?xt=urn:btih:<hash>[&dn=<name>][&tr=<tracker>]...`
    ///
    /// `xt` always comes first since some clients expect it there.
    pub fn to_uri_with(&self, encoding: HashEncoding) -> String {
        let hash = match encoding {
            HashEncoding::Hex => self.info_hash.to_hex(),
            HashEncoding::Base32 => self.info_hash.to_base32(),
        };
        let mut uri = format!("magnet:?xt=urn:btih:{}", hash);

        if let Some(ref name) = self.display_name {
            uri.push_str("&dn=");
            uri.push_str(&urlencoding::encode(name));
        }

        for tracker in &self.trackers {
            uri.push_str("&tr=");
            uri.push_str(&urlencoding::encode(tracker));
        }

        uri
    }
}

impl fmt::Display for MagnetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

/// Builds the plain `magnet:?xt=...&dn=...` URI for a hash and name.
pub fn build_magnet(info_hash: &InfoHash, display_name: &str) -> String {
    MagnetLink::new(*info_hash, display_name).to_uri()
}
