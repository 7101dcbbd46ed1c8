use super::error::MetainfoError;
use super::info_hash::InfoHash;
use super::magnet::MagnetLink;
use crate::bencode::{decode_spanned, Dict, Value};
use bytes::Bytes;

/// A file within a torrent.
///
/// For single-file torrents there is one entry whose path is the torrent name.
/// For multi-file torrents paths are relative to the torrent's root directory
/// and do not include the torrent name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path segments exactly as stored in the file; not necessarily UTF-8.
    pub path: Vec<Bytes>,
    /// The `path.utf-8` (or `name.utf-8`) variant some creators add next to
    /// a legacy-encoded `path`.
    pub path_utf8: Option<Vec<Bytes>>,
    /// Size of the file in bytes.
    pub length: u64,
}

impl FileEntry {
    /// The segments to show a user: the UTF-8 variant when there is one.
    pub fn display_segments(&self) -> &[Bytes] {
        self.path_utf8.as_deref().unwrap_or(&self.path)
    }

    /// Segments joined with `/`, invalid UTF-8 replaced with `U+FFFD`.
    pub fn display_path(&self) -> String {
        self.display_segments()
            .iter()
            .map(|segment| String::from_utf8_lossy(segment))
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Everything a torrent metainfo file says about its content.
///
/// Built once from the raw file bytes and never modified afterwards.
///
/// # Examples
///
/// ```
/// use torinfo::metainfo::TorrentMetadata;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let data = b"d10:created by4:test4:infod6:lengthi10e4:name5:a.txtee";
/// let torrent = TorrentMetadata::from_bytes(data)?;
///
/// assert_eq!(torrent.name, "a.txt");
/// assert_eq!(torrent.created_by.as_deref(), Some("test"));
/// assert_eq!(torrent.total_length, 10);
/// assert_eq!(torrent.files[0].display_path(), "a.txt");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentMetadata {
    /// Name/version of the program that created the torrent.
    pub created_by: Option<String>,
    pub comment: Option<String>,
    /// Character set the creator declared for text fields.
    pub encoding: Option<String>,
    /// Unix timestamp when the torrent was created.
    pub creation_date: Option<i64>,
    /// Suggested name for the file or directory.
    pub name: String,
    /// `name.utf-8`, when present.
    pub name_utf8: Option<String>,
    pub files: Vec<FileEntry>,
    /// Sum of all file lengths.
    pub total_length: u64,
    pub info_hash: InfoHash,
    pub piece_length: Option<u64>,
    /// Number of 20-byte piece hashes in `pieces`.
    pub piece_count: usize,
    /// If true, clients should only use trackers in the metainfo (no DHT/PEX).
    pub private: bool,
    /// Primary tracker URL.
    pub announce: Option<String>,
    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub announce_list: Vec<Vec<String>>,
    /// Web seed URLs ([BEP-19](http://bittorrent.org/beps/bep_0019.html)).
    pub url_list: Vec<String>,
}

impl TorrentMetadata {
    /// Parses a torrent file from raw bytes.
    ///
    /// The info hash is taken over the `info` dictionary's original bytes.
    /// Bytes after the top-level dictionary are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data is not valid bencode
    /// - `info`, `info.name`, or a file length is missing
    /// - A field holds the wrong kind of value
    /// - The file lengths overflow a 64-bit signed total
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let decoded = decode_spanned(data)?;
        let root = decoded.root();

        if root.value().as_dict().is_none() {
            return Err(invalid("root", "dictionary", root.value()));
        }
        let info = root.get(b"info").ok_or(MetainfoError::MissingField("info"))?;
        let info_hash = InfoHash::from_info_bytes(info.raw());

        Self::from_value(decoded.value(), info_hash)
    }

    /// Builds the metadata from an already decoded top-level dictionary.
    ///
    /// `info_hash` is taken as given; see [`InfoHash::compute`].
    pub fn from_value(root: &Value, info_hash: InfoHash) -> Result<Self, MetainfoError> {
        let dict = root
            .as_dict()
            .ok_or_else(|| invalid("root", "dictionary", root))?;

        let info = dict
            .get(b"info".as_slice())
            .ok_or(MetainfoError::MissingField("info"))?;
        let info = info
            .as_dict()
            .ok_or_else(|| invalid("info", "dictionary", info))?;

        let name = optional_text(info, "name")?.ok_or(MetainfoError::MissingField("name"))?;
        let name_utf8 = optional_text(info, "name.utf-8")?;
        let files = parse_files(info)?;

        let total_length = files
            .iter()
            .try_fold(0u64, |total, file| {
                total
                    .checked_add(file.length)
                    .filter(|&t| i64::try_from(t).is_ok())
            })
            .ok_or(MetainfoError::SizeOverflow)?;

        let piece_length = optional_length(info, "piece length")?;
        let piece_count = optional_bytes(info, "pieces")?
            .map(|pieces| pieces.len() / 20)
            .unwrap_or(0);
        let private = optional_integer(info, "private")? == Some(1);

        Ok(Self {
            created_by: optional_text(dict, "created by")?,
            comment: optional_text(dict, "comment")?,
            encoding: optional_text(dict, "encoding")?,
            creation_date: optional_integer(dict, "creation date")?,
            name,
            name_utf8,
            files,
            total_length,
            info_hash,
            piece_length,
            piece_count,
            private,
            announce: optional_text(dict, "announce")?,
            announce_list: parse_announce_list(dict)?,
            url_list: parse_url_list(dict)?,
        })
    }

    /// `name.utf-8` when present, `name` otherwise.
    pub fn display_name(&self) -> &str {
        self.name_utf8.as_deref().unwrap_or(&self.name)
    }

    /// Distinct tracker URLs, in tier order.
    ///
    /// A non-empty `announce-list` supersedes `announce`
    /// ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub fn trackers(&self) -> Vec<String> {
        let mut trackers: Vec<String> = Vec::new();

        let tiers = self.announce_list.iter().flatten();
        let candidates: Vec<&String> = if tiers.clone().any(|t| !t.is_empty()) {
            tiers.collect()
        } else {
            self.announce.iter().collect()
        };

        for tracker in candidates {
            if !tracker.is_empty() && !trackers.contains(tracker) {
                trackers.push(tracker.clone());
            }
        }

        trackers
    }

    /// The magnet link for this torrent, with its trackers.
    pub fn magnet_link(&self) -> MagnetLink {
        MagnetLink::new(self.info_hash, self.display_name()).with_trackers(self.trackers())
    }
}

fn invalid(field: &'static str, expected: &'static str, found: &Value) -> MetainfoError {
    MetainfoError::InvalidFieldType {
        field,
        expected,
        found: found.kind(),
    }
}

fn optional_bytes<'v>(
    dict: &'v Dict,
    key: &'static str,
) -> Result<Option<&'v Bytes>, MetainfoError> {
    dict.get(key.as_bytes())
        .map(|v| v.as_bytes().ok_or_else(|| invalid(key, "byte string", v)))
        .transpose()
}

fn optional_text(dict: &Dict, key: &'static str) -> Result<Option<String>, MetainfoError> {
    Ok(optional_bytes(dict, key)?.map(|b| String::from_utf8_lossy(b).into_owned()))
}

fn optional_integer(dict: &Dict, key: &'static str) -> Result<Option<i64>, MetainfoError> {
    dict.get(key.as_bytes())
        .map(|v| v.as_integer().ok_or_else(|| invalid(key, "integer", v)))
        .transpose()
}

fn optional_length(dict: &Dict, key: &'static str) -> Result<Option<u64>, MetainfoError> {
    optional_integer(dict, key)?
        .map(|n| {
            u64::try_from(n).map_err(|_| MetainfoError::InvalidFieldType {
                field: key,
                expected: "non-negative integer",
                found: "negative integer",
            })
        })
        .transpose()
}

fn optional_list<'v>(
    dict: &'v Dict,
    key: &'static str,
) -> Result<Option<&'v [Value]>, MetainfoError> {
    dict.get(key.as_bytes())
        .map(|v| v.as_list().ok_or_else(|| invalid(key, "list", v)))
        .transpose()
}

fn byte_string_list(items: &[Value], key: &'static str) -> Result<Vec<Bytes>, MetainfoError> {
    items
        .iter()
        .map(|item| {
            item.as_bytes()
                .cloned()
                .ok_or_else(|| invalid(key, "list of byte strings", item))
        })
        .collect()
}

fn parse_files(info: &Dict) -> Result<Vec<FileEntry>, MetainfoError> {
    let Some(files) = optional_list(info, "files")? else {
        let name = optional_bytes(info, "name")?.ok_or(MetainfoError::MissingField("name"))?;
        let length =
            optional_length(info, "length")?.ok_or(MetainfoError::MissingField("length"))?;
        let path_utf8 = optional_bytes(info, "name.utf-8")?.map(|n| vec![n.clone()]);

        return Ok(vec![FileEntry {
            path: vec![name.clone()],
            path_utf8,
            length,
        }]);
    };

    files
        .iter()
        .map(|file| -> Result<FileEntry, MetainfoError> {
            let file = file
                .as_dict()
                .ok_or_else(|| invalid("files", "list of dictionaries", file))?;

            let length =
                optional_length(file, "length")?.ok_or(MetainfoError::MissingField("length"))?;
            let path = optional_list(file, "path")?.ok_or(MetainfoError::MissingField("path"))?;
            let path_utf8 = optional_list(file, "path.utf-8")?
                .map(|p| byte_string_list(p, "path.utf-8"))
                .transpose()?;

            Ok(FileEntry {
                path: byte_string_list(path, "path")?,
                path_utf8,
                length,
            })
        })
        .collect()
}

fn parse_announce_list(dict: &Dict) -> Result<Vec<Vec<String>>, MetainfoError> {
    let Some(tiers) = optional_list(dict, "announce-list")? else {
        return Ok(Vec::new());
    };

    tiers
        .iter()
        .map(|tier| -> Result<Vec<String>, MetainfoError> {
            let urls = tier
                .as_list()
                .ok_or_else(|| invalid("announce-list", "list of lists", tier))?;
            Ok(byte_string_list(urls, "announce-list")?
                .iter()
                .map(|url| String::from_utf8_lossy(url).into_owned())
                .collect())
        })
        .collect()
}

fn parse_url_list(dict: &Dict) -> Result<Vec<String>, MetainfoError> {
    let urls = match dict.get(b"url-list".as_slice()) {
        None => return Ok(Vec::new()),
        Some(Value::Bytes(url)) => vec![url.clone()],
        Some(Value::List(urls)) => byte_string_list(urls, "url-list")?,
        Some(other) => return Err(invalid("url-list", "byte string or list", other)),
    };

    Ok(urls
        .iter()
        .filter(|url| !url.is_empty())
        .map(|url| String::from_utf8_lossy(url).into_owned())
        .collect())
}
