//! torinfo - print the metadata of a torrent file

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use torinfo::metainfo::HashEncoding;
use torinfo::{Report, TorrentMetadata};
use tracing::{debug, info};

use crate::cli::{Args, Output};

fn main() -> Result<()> {
    let args = Args::parse();
    cli::init_tracing(args.verbose);

    let path = &args.torrent;
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!(path = %path.display(), bytes = data.len(), "read metainfo file");

    let torrent = TorrentMetadata::from_bytes(&data)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(
        name = %torrent.name,
        info_hash = %torrent.info_hash,
        files = torrent.files.len(),
        size = torrent.total_length,
        "parsed metainfo"
    );

    let encoding = if args.base32 {
        HashEncoding::Base32
    } else {
        HashEncoding::Hex
    };
    let report = Report::with_hash_encoding(&torrent, encoding);

    match args.output() {
        Output::Fields(fields) => print!("{}", report.render_fields(&fields)),
        Output::Json => println!("{}", report.to_json().context("serializing report")?),
        Output::Table => print!("{}", report.render_table()),
    }

    Ok(())
}
