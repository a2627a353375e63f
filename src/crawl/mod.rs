// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl loop and its collaborators.
//
// Features:
// - Frontier trait plus an in-memory breadth-first implementation
// - Corpus trait plus in-memory and on-disk (crawl dump) implementations
// - The Crawler, which pulls URLs, asks the trap engine about every link and
//   feeds accepted links back
//
// The crawl never goes to the network. It replays content some earlier
// fetcher already stored.
// =============================================================================

mod corpus;
mod frontier;
mod orchestrator;

pub use corpus::{Corpus, DirectoryCorpus, MemoryCorpus};
pub use frontier::{Frontier, MemoryFrontier};
pub use orchestrator::Crawler;
