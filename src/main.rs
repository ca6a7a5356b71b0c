//! Helpdex CLI binary.

use std::io::Write;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use helpdex::cli::args::*;
use helpdex::cli::commands::*;

#[tokio::main]
async fn main() {
    let args = HelpdexArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .parse_env("HELPDEX_LOG")
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(args: HelpdexArgs) -> anyhow::Result<()> {
    let command = match &args.command {
        Command::Search(_) => "search",
        Command::Toc(_) => "toc",
        Command::Stats(_) => "stats",
    };
    execute_command(args)
        .await
        .with_context(|| format!("{command} failed"))
}
