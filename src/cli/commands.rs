//! Command implementations for the helpdex CLI.

use std::path::Path;
use std::time::Instant;

use futures::future::try_join_all;
use log::{info, warn};

use crate::book::book::Book;
use crate::book::registry::BookRegistry;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::HelpdexConfig;
use crate::error::{HelpdexError, Result};
use crate::loader::book_loader::{BookLoader, LoadReport};
use crate::loader::config::LoaderConfig;
use crate::loader::source::DirectoryShardSource;
use crate::locator::Locator;
use crate::messages;
use crate::search::engine::QueryEngine;
use crate::search::scope::SearchScope;

/// Execute a CLI command.
pub async fn execute_command(args: HelpdexArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Search(search_args) => search_books(search_args, &config, &args).await,
        Command::Toc(toc_args) => print_toc(toc_args, &config, &args).await,
        Command::Stats(stats_args) => show_stats(stats_args, &config, &args).await,
    }
}

/// Read the configuration file if one was given, then apply overrides.
pub fn load_config(args: &HelpdexArgs) -> Result<HelpdexConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("reading configuration from {}", path.display());
            HelpdexConfig::from_file(path)?
        }
        None => HelpdexConfig::default(),
    };
    if let Some(locale) = &args.locale {
        config.locale = locale.clone();
    }
    Ok(config)
}

/// Load one book from a directory holding `book.json`.
pub async fn load_book_dir(dir: &Path, config: &LoaderConfig) -> Result<(Book, LoadReport)> {
    let loader = BookLoader::new(DirectoryShardSource::new(dir), config.clone())?;
    let (book, report) = loader.load().await?;
    for (shard, reason) in &report.failed_shards {
        warn!("{}: shard {shard} failed: {reason}", dir.display());
    }
    Ok((book, report))
}

/// Load several book directories concurrently, keeping their order.
pub async fn load_book_dirs<P: AsRef<Path>>(
    dirs: &[P],
    config: &LoaderConfig,
) -> Result<Vec<(Book, LoadReport)>> {
    try_join_all(dirs.iter().map(|dir| load_book_dir(dir.as_ref(), config))).await
}

/// Register loaded books in the order given.
pub fn build_registry<I>(books: I) -> Result<BookRegistry>
where
    I: IntoIterator<Item = Book>,
{
    let mut registry = BookRegistry::new();
    for book in books {
        registry.register(book)?;
    }
    Ok(registry)
}

/// Search books.
async fn search_books(args: &SearchArgs, config: &HelpdexConfig, cli_args: &HelpdexArgs) -> Result<()> {
    let messages = messages::resolve(&config.locale);
    if cli_args.verbosity() > 1 {
        eprintln!("{}", messages.initializing);
    }

    let loaded = load_book_dirs(&args.books, &config.loader).await?;
    let registry = build_registry(loaded.into_iter().map(|(book, _)| book))?;

    let mut search_config = config.search.clone();
    if let Some(limit) = args.limit {
        search_config.max_results = limit;
    }
    search_config.validate()?;

    let scope = if args.only.is_empty() {
        SearchScope::All
    } else {
        SearchScope::books(args.only.iter().cloned())
    };

    if cli_args.verbosity() > 1 {
        eprintln!("{}", messages.search_searching);
    }
    let start_time = Instant::now();
    let hits = QueryEngine::new(&registry, &args.query)
        .with_config(search_config)
        .with_scope(scope)
        .into_results();
    let duration = start_time.elapsed();

    let output = SearchOutput {
        query: args.query.clone(),
        hits: hits
            .iter()
            .enumerate()
            .map(|(i, hit)| HitSummary::from_hit(i + 1, hit))
            .collect(),
        duration_ms: duration.as_millis() as u64,
        messages,
    };
    output_result(&output, cli_args)
}

/// Print a book's table of contents.
async fn print_toc(args: &TocArgs, config: &HelpdexConfig, cli_args: &HelpdexArgs) -> Result<()> {
    let (book, _) = load_book_dir(&args.book, &config.loader).await?;
    let toc = book.toc();

    let entries = match &args.sync {
        Some(wire) => {
            let locator = Locator::parse(wire)?;
            let node = toc
                .sync_to(&locator)
                .ok_or_else(|| HelpdexError::other(format!("no TOC entry for {wire}")))?;
            toc.path_to(node.id())
                .into_iter()
                .enumerate()
                .map(|(depth, node)| TocLine::from_node(depth, node))
                .collect()
        }
        None => toc
            .flatten()
            .filter(|(depth, _)| args.max_depth.is_none_or(|max| *depth <= max))
            .map(|(depth, node)| TocLine::from_node(depth, node))
            .collect(),
    };

    output_result(
        &TocOutput {
            book_id: book.id().to_string(),
            entries,
        },
        cli_args,
    )
}

/// Show statistics for each book.
async fn show_stats(args: &StatsArgs, config: &HelpdexConfig, cli_args: &HelpdexArgs) -> Result<()> {
    let loaded = load_book_dirs(&args.books, &config.loader).await?;
    let books = loaded
        .iter()
        .map(|(book, report)| BookStats::new(book, report))
        .collect();
    output_result(&StatsOutput { books }, cli_args)
}
