// src/cli.rs
// =============================================================================
// This file defines the command-line interface using the `clap` crate.
//
// Two subcommands:
// - crawl: replay a stored crawl through the trap engine and write reports
// - check: ask the engine about a single URL
//
// Rust concepts:
// - Derive macros: clap generates the parser from these types
// - Option<T>: arguments that may be left out
// - Vec<T>: arguments that may be given more than once
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// The whole command line
//
// `global = true` lets --config and --verbose appear before or after the
// subcommand name
#[derive(Parser, Debug)]
#[command(
    name = "crawl-sieve",
    version,
    about = "Decide which discovered links a web crawler should fetch",
    long_about = "crawl-sieve filters crawl frontiers: it rejects URLs whose shape marks them as traps \
                  and detects directories that keep serving near-identical pages."
)]
pub struct Cli {
    /// Path to a TOML config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a stored corpus starting from one or more seed URLs
    ///
    /// Example: crawl-sieve crawl --corpus ./dump --seed https://example.com/
    Crawl {
        /// Directory holding the corpus (index.json plus page files)
        #[arg(long)]
        corpus: PathBuf,

        /// Seed URL; repeat the flag for several seeds
        #[arg(long = "seed", required = true)]
        seeds: Vec<String>,

        /// Directory the report files are appended to
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Also print the run report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Check whether a single URL would be fetched
    ///
    /// Without --corpus only the URL shape is checked.
    ///
    /// Example: crawl-sieve check "https://example.com/a?b=1"
    Check {
        /// URL to check
        url: String,

        /// Corpus to run the duplicate check against
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crawl_with_seeds() {
        let cli = Cli::parse_from([
            "crawl-sieve",
            "crawl",
            "--corpus",
            "dump",
            "--seed",
            "http://a.com/",
            "--seed",
            "http://b.com/",
            "--verbose",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Crawl { corpus, seeds, out, json } => {
                assert_eq!(corpus, PathBuf::from("dump"));
                assert_eq!(seeds, vec!["http://a.com/", "http://b.com/"]);
                assert_eq!(out, PathBuf::from("."));
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_crawl_requires_seed() {
        let result = Cli::try_parse_from(["crawl-sieve", "crawl", "--corpus", "dump"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_check_with_global_config() {
        let cli = Cli::parse_from(["crawl-sieve", "--config", "sieve.toml", "check", "http://a.com/x"]);

        assert_eq!(cli.config, Some(PathBuf::from("sieve.toml")));
        match cli.command {
            Commands::Check { url, corpus } => {
                assert_eq!(url, "http://a.com/x");
                assert!(corpus.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
