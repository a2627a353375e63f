// src/crawl/frontier.rs
// =============================================================================
// The frontier: URLs waiting to be processed.
//
// The engine only needs a small contract from it (the `Frontier` trait). The
// bundled `MemoryFrontier` is a breadth-first queue:
// 1. Seeds go into the queue
// 2. `next_url` pops from the front
// 3. `add_url` pushes to the back, unless the URL was ever queued before
//
// Rust concepts:
// - VecDeque: double-ended queue, push_back/pop_front for breadth-first order
// - HashSet: O(1) "have we seen this URL" checks
// =============================================================================

use std::collections::{HashSet, VecDeque};

/// Queue of discovered URLs, owner of cross-page deduplication
pub trait Frontier {
    fn has_next_url(&self) -> bool;

    /// Pop the next URL to process
    fn next_url(&mut self) -> Option<String>;

    /// Queue a URL; already-known URLs are ignored
    fn add_url(&mut self, url: String);

    /// Every URL the frontier has ever accepted
    fn known_urls(&self) -> Vec<&str>;

    /// How many URLs have been handed out so far
    fn fetched_count(&self) -> usize;

    /// URLs still waiting
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory breadth-first frontier
#[derive(Debug, Default)]
pub struct MemoryFrontier {
    queue: VecDeque<String>,
    // Insertion order of every URL ever queued, for reporting
    known: Vec<String>,
    seen: HashSet<String>,
    fetched: usize,
}

impl MemoryFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frontier pre-loaded with seed URLs
    pub fn with_seeds<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut frontier = Self::new();
        for seed in seeds {
            frontier.add_url(seed.into());
        }
        frontier
    }
}

impl Frontier for MemoryFrontier {
    fn has_next_url(&self) -> bool {
        !self.queue.is_empty()
    }

    fn next_url(&mut self) -> Option<String> {
        let url = self.queue.pop_front()?;
        self.fetched += 1;
        Some(url)
    }

    fn add_url(&mut self, url: String) {
        // Skip if already queued at some point
        if self.seen.insert(url.clone()) {
            self.known.push(url.clone());
            self.queue.push_back(url);
        }
    }

    fn known_urls(&self) -> Vec<&str> {
        self.known.iter().map(String::as_str).collect()
    }

    fn fetched_count(&self) -> usize {
        self.fetched
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}
