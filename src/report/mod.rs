// src/report/mod.rs
// =============================================================================
// Run analytics and the report files written at the end of a crawl.
//
// Submodules:
// - stats: counters collected while crawling and the final RunReport
// - stopwords: words left out of the frequency table
// - writer: line-oriented report files
// =============================================================================

mod stats;
mod stopwords;
mod writer;

pub use stats::{count_subdomains, PageCount, RunReport, RunStats, TrapRecord, Vocabulary, WordCount};
pub use stopwords::Stopwords;
pub use writer::{open_append, ReportWriter, ACCEPTED_LOG, REMOVED_FILE, STATS_FILE, SUBDOMAINS_FILE, TRAPS_FILE};
