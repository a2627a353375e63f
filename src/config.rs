// src/config.rs
// =============================================================================
// Configuration for the trap filter and the duplicate classifier.
//
// Every threshold the engine uses lives here instead of being a literal in the
// code. The config is read from a TOML file; any field left out falls back to
// the defaults below, so an empty file is a valid config.
//
// Example:
//   [filter]
//   domain_scope = ["ics.uci.edu"]
//   max_url_length = 80
//
//   [duplicate]
//   similarity_threshold = 0.9
//   profile_policy = { blend = 0.25 }
//
// Rust concepts:
// - serde(default = "fn"): per-field defaults when a key is missing
// - Enums with data: ProfilePolicy carries its blend weight
// =============================================================================

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// URL shape heuristics
    #[serde(default)]
    pub filter: FilterConfig,

    /// Near-duplicate detection
    #[serde(default)]
    pub duplicate: DuplicateConfig,

    /// End-of-run report
    #[serde(default)]
    pub report: ReportConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the URL shape filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Schemes that may be fetched at all
    #[serde(default = "default_allowed_schemes")]
    pub allowed_schemes: Vec<String>,

    /// Host suffixes that make up the crawl scope. Empty means every host.
    #[serde(default)]
    pub domain_scope: Vec<String>,

    /// File extensions (without the dot) that are never worth fetching
    #[serde(default = "default_blocked_extensions")]
    pub blocked_extensions: Vec<String>,

    /// Longest URL, in characters, that is still accepted
    #[serde(default = "default_max_url_length")]
    pub max_url_length: usize,

    /// Most distinct query key/value pairs a URL may carry
    #[serde(default = "default_max_query_params")]
    pub max_query_params: usize,

    /// Fragments that only point somewhere inside the same page
    #[serde(default = "default_blocked_fragments")]
    pub blocked_fragments: Vec<String>,

    /// Query keys that spawn endless permutations of one page
    #[serde(default = "default_blocked_query_keys")]
    pub blocked_query_keys: Vec<String>,

    /// How many times one path segment value may appear in a path
    #[serde(default = "default_max_segment_repeats")]
    pub max_segment_repeats: usize,

    /// Most pieces the path may split into on `/`. The leading empty piece
    /// counts, so the default 10 rejects `/1/2/3/4/5/6/7/8/9/10` and
    /// `/1/2/3/4/5/6/7/8/9/`
    #[serde(default = "default_max_path_segments")]
    pub max_path_segments: usize,

    /// Reject URLs whose final path segment contains `id=`
    #[serde(default = "default_true")]
    pub reject_id_in_final_segment: bool,
}

/// How a bucket's stored phrase profile evolves after its first page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilePolicy {
    /// The first page seen in a bucket stays its fingerprint forever
    FirstWins,
    /// Blend each compared page into the stored counts with this weight
    Blend(f64),
}

/// Settings for the content fingerprint store and duplicate classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateConfig {
    /// Number of consecutive tokens in one phrase
    #[serde(default = "default_ngram_size")]
    pub ngram_size: usize,

    /// Similarity above which a page counts as a near-duplicate
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Distinct hits needed before a bucket is whitelisted
    #[serde(default = "default_promote_after")]
    pub promote_after: u32,

    /// Similar hits needed before a bucket is blacklisted
    #[serde(default = "default_blacklist_after")]
    pub blacklist_after: u32,

    /// Most similar hits a bucket may have and still be whitelisted
    #[serde(default = "default_max_similar_for_promotion")]
    pub max_similar_for_promotion: u32,

    /// Markers for index pages that alias the same resource
    #[serde(default = "default_index_markers")]
    pub index_markers: Vec<String>,

    /// Stored profile update strategy
    #[serde(default = "default_profile_policy")]
    pub profile_policy: ProfilePolicy,
}

/// Settings for the end-of-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How many of the most frequent words to list
    #[serde(default = "default_top_words")]
    pub top_words: usize,

    /// One stopword per line; the built-in English list is used when unset
    #[serde(default)]
    pub stopwords_file: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,
}

// -----------------------------------------------------------------------------
// Defaults
// -----------------------------------------------------------------------------

fn default_allowed_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

fn default_blocked_extensions() -> Vec<String> {
    [
        "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2",
        "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf",
        "ps", "eps", "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data",
        "dat", "exe", "bz2", "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll",
        "cnf", "tgz", "sha1", "thmx", "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv",
        "swf", "wma", "zip", "rar", "gz",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_url_length() -> usize {
    80
}

fn default_max_query_params() -> usize {
    3
}

fn default_blocked_fragments() -> Vec<String> {
    vec!["content-main".to_string()]
}

fn default_blocked_query_keys() -> Vec<String> {
    [
        "session", "sessionid", "sid", "action", "do", "sort", "order", "search", "format",
        "download", "replytocom", "share",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_segment_repeats() -> usize {
    2
}

fn default_max_path_segments() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_ngram_size() -> usize {
    5
}

fn default_similarity_threshold() -> f64 {
    0.9
}

fn default_promote_after() -> u32 {
    8
}

fn default_blacklist_after() -> u32 {
    8
}

fn default_max_similar_for_promotion() -> u32 {
    2
}

fn default_index_markers() -> Vec<String> {
    vec!["index".to_string(), "index.php".to_string(), "php".to_string()]
}

fn default_profile_policy() -> ProfilePolicy {
    ProfilePolicy::FirstWins
}

fn default_top_words() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            allowed_schemes: default_allowed_schemes(),
            domain_scope: Vec::new(),
            blocked_extensions: default_blocked_extensions(),
            max_url_length: default_max_url_length(),
            max_query_params: default_max_query_params(),
            blocked_fragments: default_blocked_fragments(),
            blocked_query_keys: default_blocked_query_keys(),
            max_segment_repeats: default_max_segment_repeats(),
            max_path_segments: default_max_path_segments(),
            reject_id_in_final_segment: true,
        }
    }
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            ngram_size: default_ngram_size(),
            similarity_threshold: default_similarity_threshold(),
            promote_after: default_promote_after(),
            blacklist_after: default_blacklist_after(),
            max_similar_for_promotion: default_max_similar_for_promotion(),
            index_markers: default_index_markers(),
            profile_policy: default_profile_policy(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_words: default_top_words(),
            stopwords_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from a file when one is given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let dup = &self.duplicate;

        if dup.ngram_size == 0 {
            return Err(Error::Config("duplicate.ngram_size must be > 0".to_string()));
        }

        if !(dup.similarity_threshold > 0.0 && dup.similarity_threshold <= 1.0) {
            return Err(Error::Config(
                "duplicate.similarity_threshold must be in (0.0, 1.0]".to_string(),
            ));
        }

        if dup.promote_after == 0 || dup.blacklist_after == 0 {
            return Err(Error::Config(
                "duplicate.promote_after and duplicate.blacklist_after must be > 0".to_string(),
            ));
        }

        if let ProfilePolicy::Blend(weight) = dup.profile_policy {
            if !(weight > 0.0 && weight <= 1.0) {
                return Err(Error::Config(
                    "duplicate.profile_policy blend weight must be in (0.0, 1.0]".to_string(),
                ));
            }
        }

        if self.filter.max_url_length == 0 {
            return Err(Error::Config("filter.max_url_length must be > 0".to_string()));
        }

        if self.filter.allowed_schemes.is_empty() {
            return Err(Error::Config(
                "filter.allowed_schemes must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
