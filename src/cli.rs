use clap::{ArgAction, Parser};
use std::path::PathBuf;
use torinfo::Field;
use tracing_subscriber::EnvFilter;

/// Print the metadata stored in a torrent file.
///
/// With no field flags every field is printed as a labelled table.
#[derive(Debug, Parser)]
#[command(name = "torinfo", version)]
pub struct Args {
    /// Print all fields, ignoring the single-field flags
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Print the creator
    #[arg(short = 'o', long)]
    pub creator: bool,

    /// Print the comment
    #[arg(short = 'c', long)]
    pub comment: bool,

    /// Print the creation date
    #[arg(short = 'd', long)]
    pub date: bool,

    /// Print the text encoding
    #[arg(short = 'e', long)]
    pub encoding: bool,

    /// Print the info hash
    #[arg(short = 'i', long)]
    pub hash: bool,

    /// Print the name
    #[arg(short = 'n', long)]
    pub name: bool,

    /// Print the files, one per line
    #[arg(short = 'f', long)]
    pub files: bool,

    /// Print the total size in bytes
    #[arg(short = 's', long)]
    pub size: bool,

    /// Print the magnet link
    #[arg(short = 'm', long)]
    pub magnet: bool,

    /// Print all fields as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Spell the magnet link's info hash in base32 instead of hex
    #[arg(long)]
    pub base32: bool,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Torrent file to read
    pub torrent: PathBuf,
}

/// What to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Fields(Vec<Field>),
    Json,
    Table,
}

impl Args {
    /// Field flags win over `--json` unless `-a` is given; fields print in a
    /// fixed order.
    pub fn output(&self) -> Output {
        let selected = [
            self.creator,
            self.comment,
            self.date,
            self.encoding,
            self.hash,
            self.name,
            self.files,
            self.size,
            self.magnet,
        ];
        let fields: Vec<Field> = Field::ALL
            .into_iter()
            .zip(selected)
            .filter_map(|(field, on)| on.then_some(field))
            .collect();

        if !fields.is_empty() && !self.all {
            Output::Fields(fields)
        } else if self.json {
            Output::Json
        } else {
            Output::Table
        }
    }
}

/// Logs go to stderr so they never mix with the printed metadata.
/// `RUST_LOG` overrides the level picked by `-v`.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("torinfo").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_is_table() {
        let args = parse(&["file.torrent"]);
        assert_eq!(args.output(), Output::Table);
        assert_eq!(args.torrent, PathBuf::from("file.torrent"));
        assert_eq!(parse(&["-a", "file.torrent"]).output(), Output::Table);
    }

    #[test]
    fn test_field_flags_keep_fixed_order() {
        let args = parse(&["-m", "-n", "-o", "x.torrent"]);
        assert_eq!(
            args.output(),
            Output::Fields(vec![Field::Creator, Field::Name, Field::Magnet])
        );
    }

    #[test]
    fn test_fields_win_over_json() {
        assert_eq!(parse(&["--json", "x"]).output(), Output::Json);
        assert_eq!(
            parse(&["--json", "-s", "x"]).output(),
            Output::Fields(vec![Field::Size])
        );
    }

    #[test]
    fn test_all_overrides_field_flags() {
        assert_eq!(parse(&["-a", "-n", "x"]).output(), Output::Table);
        assert_eq!(parse(&["-a", "-n", "--json", "x"]).output(), Output::Json);
    }

    #[test]
    fn test_verbose_count() {
        assert_eq!(parse(&["-vv", "x"]).verbose, 2);
    }

    #[test]
    fn test_path_required() {
        assert!(Args::try_parse_from(["torinfo", "-n"]).is_err());
    }
}
