//! Printable views of a [`TorrentMetadata`].
//!
//! A [`Report`] flattens the metadata into the strings a user sees: the
//! creation date as local time, the hash as hex, file paths as text. It can
//! be rendered as a labelled table, as selected fields one per line, or as
//! JSON.

use crate::metainfo::{HashEncoding, TorrentMetadata};
use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fmt;

/// A single printable field of a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Creator,
    Comment,
    Date,
    Encoding,
    Hash,
    Name,
    Files,
    Size,
    Magnet,
}

impl Field {
    /// Every field, in printing order.
    pub const ALL: [Field; 9] = [
        Field::Creator,
        Field::Comment,
        Field::Date,
        Field::Encoding,
        Field::Hash,
        Field::Name,
        Field::Files,
        Field::Size,
        Field::Magnet,
    ];

    /// Row label in the table view.
    pub fn label(self) -> &'static str {
        match self {
            Field::Creator => "Creator",
            Field::Comment => "Comment",
            Field::Date => "Date",
            Field::Encoding => "Encode",
            Field::Hash => "Hash",
            Field::Name => "Name",
            Field::Files => "Files",
            Field::Size => "Size",
            Field::Magnet => "Magnet",
        }
    }
}

/// The user-facing summary of one torrent file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub creator: String,
    pub comment: String,
    /// Creation date in local time, empty when the file has none.
    pub date: String,
    pub encoding: String,
    pub hash: String,
    pub name: String,
    pub files: Vec<String>,
    pub size: u64,
    pub magnet: String,
}

impl Report {
    pub fn from_metadata(torrent: &TorrentMetadata) -> Self {
        Self::with_hash_encoding(torrent, HashEncoding::Hex)
    }

    /// Like [`Report::from_metadata`], spelling the magnet link's hash with
    /// `encoding`.
    pub fn with_hash_encoding(torrent: &TorrentMetadata, encoding: HashEncoding) -> Self {
        Self {
            creator: torrent.created_by.clone().unwrap_or_default(),
            comment: torrent.comment.clone().unwrap_or_default(),
            date: torrent
                .creation_date
                .map(|ts| format_date(ts, &Local))
                .unwrap_or_default(),
            encoding: torrent.encoding.clone().unwrap_or_default(),
            hash: torrent.info_hash.to_hex(),
            name: torrent.display_name().to_string(),
            files: torrent.files.iter().map(|f| f.display_path()).collect(),
            size: torrent.total_length,
            magnet: torrent.magnet_link().to_uri_with(encoding),
        }
    }

    /// The bare value of one field. Files are one per line.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Creator => self.creator.clone(),
            Field::Comment => self.comment.clone(),
            Field::Date => self.date.clone(),
            Field::Encoding => self.encoding.clone(),
            Field::Hash => self.hash.clone(),
            Field::Name => self.name.clone(),
            Field::Files => self.files.join("\n"),
            Field::Size => self.size.to_string(),
            Field::Magnet => self.magnet.clone(),
        }
    }

    /// Each selected field's value on its own line, in `fields` order.
    pub fn render_fields(&self, fields: &[Field]) -> String {
        fields
            .iter()
            .map(|&field| format!("{}\n", self.value(field)))
            .collect()
    }

    /// Every field as a tab-separated `label value` row.
    pub fn render_table(&self) -> String {
        Field::ALL
            .iter()
            .map(|&field| {
                let value = match field {
                    Field::Files => format!("[{}]", self.files.join(" ")),
                    _ => self.value(field),
                };
                format!("{}\t\t{}\n", field.label(), value)
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_table())
    }
}

/// Formats a Unix timestamp as `YYYY-MM-DD HH:MM:SS +hhmm ZONE` in `tz`.
///
/// Timestamps outside the calendar range chrono supports are printed as the
/// raw number.
///
/// ```
/// use chrono::Utc;
/// use torinfo::report::format_date;
///
/// assert_eq!(format_date(0, &Utc), "1970-01-01 00:00:00 +0000 UTC");
/// ```
pub fn format_date<Tz>(timestamp: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match tz.timestamp_opt(timestamp, 0).single() {
        Some(date) => date.format("%Y-%m-%d %H:%M:%S %z %Z").to_string(),
        None => timestamp.to_string(),
    }
}
