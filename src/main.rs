// src/main.rs
// =============================================================================
// This is the entry point of the crawl-sieve binary.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the config file (or defaults) and set up logging
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = success/accepted, 1 = URL rejected, 2 = error)
//
// Rust concepts used:
// - Result<T, E>: errors bubble up to main with `?`
// - match: Pattern matching to handle different subcommands
// - Trait objects: the duplicate check only needs `&dyn Corpus`
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use crawl_sieve::config::LogFormat;
use crawl_sieve::crawl::{Crawler, DirectoryCorpus, MemoryFrontier};
use crawl_sieve::report::{open_append, ReportWriter, Stopwords, ACCEPTED_LOG};
use crawl_sieve::{Config, TrapEngine, Verdict};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole anyhow context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Crawl { corpus, seeds, out, json } => handle_crawl(&config, &corpus, seeds, &out, json),
        Commands::Check { url, corpus } => handle_check(&config, &url, corpus.as_deref()),
    }
}

// RUST_LOG wins; otherwise --verbose means debug, otherwise the config level.
// Logs go to stderr so stdout stays clean for --json output.
fn init_logging(config: &Config, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

// Handles the 'crawl' subcommand
fn handle_crawl(config: &Config, corpus_dir: &Path, seeds: Vec<String>, out: &Path, json: bool) -> Result<i32> {
    let corpus = DirectoryCorpus::open(corpus_dir)
        .with_context(|| format!("Failed to open corpus at {:?}", corpus_dir))?;
    info!("Opened corpus with {} page(s)", corpus.len());

    let stopwords = Stopwords::load_or_english(config.report.stopwords_file.as_deref())
        .context("Failed to load stopwords")?;

    let mut frontier = MemoryFrontier::with_seeds(seeds);
    let mut accepted_log = open_append(out, ACCEPTED_LOG)
        .with_context(|| format!("Failed to open {} in {:?}", ACCEPTED_LOG, out))?;

    let mut crawler = Crawler::new(config, stopwords);
    crawler.run(&mut frontier, &corpus, &mut accepted_log)?;

    let report = crawler.report(&frontier);
    ReportWriter::new(out).write(&report)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Fetched {} page(s)", report.pages_fetched);
        println!("Rejected {} link(s)", report.traps.len());
        println!(
            "Buckets: {} whitelisted, {} blacklisted",
            report.whitelisted_buckets.len(),
            report.blacklisted_buckets.len()
        );
        println!("Reports written to {:?}", out);
    }

    Ok(0)
}

// Handles the 'check' subcommand
// Returns 0 when the URL would be fetched, 1 when it would be rejected
fn handle_check(config: &Config, url: &str, corpus_dir: Option<&Path>) -> Result<i32> {
    let mut engine = TrapEngine::new(config);

    let verdict = match corpus_dir {
        Some(dir) => {
            let corpus = DirectoryCorpus::open(dir)
                .with_context(|| format!("Failed to open corpus at {:?}", dir))?;
            engine.is_fetchable(url, &corpus)
        }
        None => match engine.shape_filter().check_shape(url) {
            Ok(_) => Verdict::Accept,
            Err(reason) => Verdict::Reject(reason),
        },
    };

    match verdict {
        Verdict::Accept => {
            println!("ACCEPT {}", url);
            Ok(0)
        }
        Verdict::Reject(reason) => {
            println!("REJECT {} ({})", url, reason);
            Ok(1)
        }
    }
}
