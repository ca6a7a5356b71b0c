//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;

use crate::book::book::Book;
use crate::cli::args::{HelpdexArgs, OutputFormat};
use crate::error::Result;
use crate::loader::book_loader::LoadReport;
use crate::messages::MessageSet;
use crate::search::engine::SearchHit;
use crate::toc::tree::TocNode;

/// Results that know how to print themselves for a terminal.
pub trait HumanReadable {
    fn render_human(&self) -> String;
}

/// One ranked book in the search output.
#[derive(Debug, Serialize)]
pub struct HitSummary {
    pub rank: usize,
    pub book_id: String,
    pub book_title: String,
    pub score: u64,
    pub matched_words: Vec<String>,
    pub entry: Option<String>,
}

impl HitSummary {
    pub fn from_hit(rank: usize, hit: &SearchHit) -> Self {
        HitSummary {
            rank,
            book_id: hit.book.id().to_string(),
            book_title: hit.book.title().to_string(),
            score: hit.score,
            matched_words: hit.matched_words.iter().map(|w| w.to_string()).collect(),
            entry: hit.entry.as_ref().map(|locator| locator.to_string()),
        }
    }
}

/// Result structure for search operations.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub hits: Vec<HitSummary>,
    pub duration_ms: u64,
    #[serde(skip)]
    pub messages: &'static MessageSet,
}

impl HumanReadable for SearchOutput {
    fn render_human(&self) -> String {
        let mut out = String::new();
        if let Some(status) = self.messages.search_status(self.hits.len()) {
            let _ = writeln!(out, "{status}");
            return out;
        }

        let _ = writeln!(
            out,
            "{:>5}  {:<24} {:<32} {:>10}",
            self.messages.search_rank, self.messages.search_book, self.messages.search_title, "score"
        );
        for hit in &self.hits {
            let _ = writeln!(
                out,
                "{:>5}  {:<24} {:<32} {:>10}",
                hit.rank, hit.book_id, hit.book_title, hit.score
            );
            if let Some(entry) = &hit.entry {
                let _ = writeln!(out, "       -> {entry}");
            }
        }
        out
    }
}

/// One TOC line.
#[derive(Debug, Serialize)]
pub struct TocLine {
    pub depth: usize,
    pub title: String,
    pub locator: Option<String>,
}

impl TocLine {
    pub fn from_node(depth: usize, node: &TocNode) -> Self {
        TocLine {
            depth,
            title: node.title().to_string(),
            locator: node.locator().map(|locator| locator.to_string()),
        }
    }
}

/// Result structure for the toc command.
#[derive(Debug, Serialize)]
pub struct TocOutput {
    pub book_id: String,
    pub entries: Vec<TocLine>,
}

impl HumanReadable for TocOutput {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for line in &self.entries {
            let indent = "  ".repeat(line.depth);
            match &line.locator {
                Some(locator) => {
                    let _ = writeln!(out, "{indent}{} [{locator}]", line.title);
                }
                None => {
                    let _ = writeln!(out, "{indent}{}", line.title);
                }
            }
        }
        out
    }
}

/// Book statistics.
#[derive(Debug, Serialize)]
pub struct BookStats {
    pub book_id: String,
    pub title: String,
    pub toc_entries: usize,
    pub index_keys: usize,
    pub index_pairs: usize,
    pub loaded_shards: usize,
    pub failed_shards: Vec<(String, String)>,
    pub merged_entries: usize,
    pub malformed_entries: usize,
}

impl BookStats {
    pub fn new(book: &Book, report: &LoadReport) -> Self {
        BookStats {
            book_id: book.id().to_string(),
            title: book.title().to_string(),
            toc_entries: book.toc().node_count(),
            index_keys: book.index().key_count(),
            index_pairs: book.index().pair_count(),
            loaded_shards: report.loaded_shards.len(),
            failed_shards: report.failed_shards.clone(),
            merged_entries: report.merged_entries,
            malformed_entries: report.malformed_entries,
        }
    }
}

/// Result structure for the stats command.
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub books: Vec<BookStats>,
}

impl HumanReadable for StatsOutput {
    fn render_human(&self) -> String {
        let mut out = String::new();
        for stats in &self.books {
            let _ = writeln!(out, "Book: {} ({})", stats.title, stats.book_id);
            let _ = writeln!(out, "  TOC entries: {}", stats.toc_entries);
            let _ = writeln!(out, "  Index keys: {}", stats.index_keys);
            let _ = writeln!(out, "  Index pairs: {}", stats.index_pairs);
            let _ = writeln!(out, "  Shards loaded: {}", stats.loaded_shards);
            let _ = writeln!(out, "  Entries merged: {}", stats.merged_entries);
            let _ = writeln!(out, "  Entries skipped: {}", stats.malformed_entries);
            for (shard, reason) in &stats.failed_shards {
                let _ = writeln!(out, "  Failed shard {shard}: {reason}");
            }
        }
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanReadable>(result: &T, args: &HelpdexArgs) -> Result<()> {
    print!("{}", render(result, args)?);
    Ok(())
}

/// Render a result the way [`output_result`] prints it.
pub fn render<T: Serialize + HumanReadable>(result: &T, args: &HelpdexArgs) -> Result<String> {
    match args.output_format {
        OutputFormat::Human => Ok(result.render_human()),
        OutputFormat::Json => {
            let mut json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            json.push('\n');
            Ok(json)
        }
    }
}
