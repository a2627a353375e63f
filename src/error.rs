// src/error.rs
// =============================================================================
// Error types for the library side of crawl-sieve.
//
// The decision engine itself never fails: a URL it cannot understand is simply
// rejected. Errors only come from the outer shell around it:
// - loading and validating the config file
// - reading a crawl dump from disk
// - writing the report files
//
// Rust concepts:
// - thiserror: derive std::error::Error and Display from attributes
// - #[from]: automatic conversion so `?` works on foreign error types
// =============================================================================

use thiserror::Error;

/// Main error type for crawl-sieve operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for crawl-sieve
pub type Result<T> = std::result::Result<T, Error>;
