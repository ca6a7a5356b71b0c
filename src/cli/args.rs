//! Command line argument parsing for the helpdex CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Helpdex - browse and search offline help books
#[derive(Parser, Debug, Clone)]
#[command(name = "helpdex")]
#[command(about = "Browse tables of contents and search word-association indexes of help books")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct HelpdexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "HELPDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// UI locale for messages, e.g. `de` or `pt_BR` (overrides the config file)
    #[arg(short, long, env = "HELPDEX_LOCALE")]
    pub locale: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl HelpdexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search one or more books
    Search(SearchArgs),

    /// Print the table of contents of a book
    Toc(TocArgs),

    /// Show book statistics
    Stats(StatsArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Book directories, searched in the order given
    #[arg(value_name = "BOOK_DIR", required = true, num_args = 1..)]
    pub books: Vec<PathBuf>,

    /// Only search books with these ids
    #[arg(short = 'b', long = "book", value_name = "BOOK_ID")]
    pub only: Vec<String>,

    /// Maximum number of results to return (0 = unlimited)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for printing a table of contents
#[derive(Parser, Debug, Clone)]
pub struct TocArgs {
    /// Book directory
    #[arg(value_name = "BOOK_DIR")]
    pub book: PathBuf,

    /// Deepest level to print (root is level 0)
    #[arg(short, long)]
    pub max_depth: Option<usize>,

    /// Only print the path to the entry for this locator (`page.html#anchor`)
    #[arg(long, value_name = "LOCATOR")]
    pub sync: Option<String>,
}

/// Arguments for book statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Book directories
    #[arg(value_name = "BOOK_DIR", required = true, num_args = 1..)]
    pub books: Vec<PathBuf>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        let args = HelpdexArgs::try_parse_from(["helpdex", "stats", "book"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = HelpdexArgs::try_parse_from(["helpdex", "-vv", "stats", "book"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = HelpdexArgs::try_parse_from(["helpdex", "--quiet", "stats", "book"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            HelpdexArgs::try_parse_from(["helpdex", "--format", "json", "stats", "book"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_search_args() {
        let args = HelpdexArgs::try_parse_from([
            "helpdex", "search", "icmp error", "dev", "user", "--book", "dev", "-n", "5",
        ])
        .unwrap();

        match args.command {
            Command::Search(search) => {
                assert_eq!(search.query, "icmp error");
                assert_eq!(search.books, vec![PathBuf::from("dev"), PathBuf::from("user")]);
                assert_eq!(search.only, vec!["dev".to_string()]);
                assert_eq!(search.limit, Some(5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_search_requires_a_book() {
        assert!(HelpdexArgs::try_parse_from(["helpdex", "search", "icmp"]).is_err());
    }

    #[test]
    fn test_toc_args() {
        let args = HelpdexArgs::try_parse_from([
            "helpdex", "toc", "dev", "--max-depth", "2", "--sync", "mac.html#stats",
        ])
        .unwrap();

        match args.command {
            Command::Toc(toc) => {
                assert_eq!(toc.book, PathBuf::from("dev"));
                assert_eq!(toc.max_depth, Some(2));
                assert_eq!(toc.sync.as_deref(), Some("mac.html#stats"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
