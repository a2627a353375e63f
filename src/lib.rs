// src/lib.rs
// =============================================================================
// crawl-sieve: decides which discovered links a crawler should fetch.
//
// Pipeline for every link found on a fetched page:
//   extract   -> absolute URLs from anchors
//   filter    -> URL shape heuristics (scheme, extension, length, query, path)
//   dedup     -> per-directory phrase fingerprints, whitelist/blacklist
//   engine    -> the two stages above combined into one verdict
//   crawl     -> the loop that drives a frontier and a corpus through it
//   report    -> run analytics and the files written at the end
// =============================================================================

pub mod config;
pub mod crawl;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod extract;
pub mod filter;
pub mod page;
pub mod report;
pub mod state;

pub use config::Config;
pub use engine::TrapEngine;
pub use error::{Error, Result};
pub use page::{PageRecord, RejectReason, Verdict};
