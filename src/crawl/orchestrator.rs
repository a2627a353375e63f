// src/crawl/orchestrator.rs
// =============================================================================
// Drives one crawl pass over a frontier and a corpus.
//
// How it works:
// 1. Pull the next URL from the frontier
// 2. Fetch its content from the corpus and record run analytics
// 3. Append it to the accepted-URL log
// 4. Extract its links and ask the trap engine about each one
// 5. Push accepted links the corpus can serve back to the frontier
// 6. Repeat until the frontier runs dry
//
// One URL is handled end to end before the next is pulled, so the engine
// state is only ever touched by one writer.
// =============================================================================

use super::corpus::Corpus;
use super::frontier::Frontier;
use crate::config::Config;
use crate::engine::TrapEngine;
use crate::error::Result;
use crate::extract::{extract_links, page_tokens};
use crate::filter::BucketKey;
use crate::page::Verdict;
use crate::report::{count_subdomains, RunReport, RunStats, Stopwords};
use std::io::Write;
use tracing::{debug, info};

pub struct Crawler {
    engine: TrapEngine,
    stats: RunStats,
    stopwords: Stopwords,
    top_words: usize,
}

impl Crawler {
    pub fn new(config: &Config, stopwords: Stopwords) -> Self {
        Self {
            engine: TrapEngine::new(config),
            stats: RunStats::new(),
            stopwords,
            top_words: config.report.top_words,
        }
    }

    /// Process URLs until the frontier is empty
    ///
    /// Every pulled URL is written to `accepted_log`, one per line. Only
    /// failing to write that log is an error.
    pub fn run<F, C>(&mut self, frontier: &mut F, corpus: &C, accepted_log: &mut dyn Write) -> Result<()>
    where
        F: Frontier,
        C: Corpus,
    {
        while frontier.has_next_url() {
            let Some(url) = frontier.next_url() else {
                break;
            };

            info!(
                "Fetching URL {} ... Fetched: {}, Queue size: {}",
                url,
                frontier.fetched_count(),
                frontier.len()
            );

            writeln!(accepted_log, "{}", url)?;
            let accepted = self.process_page(&url, frontier, corpus);
            debug!("{} accepted out-links from {}", accepted, url);
        }

        accepted_log.flush()?;
        Ok(())
    }

    // Returns the number of links pushed to the frontier
    fn process_page<F, C>(&mut self, url: &str, frontier: &mut F, corpus: &C) -> usize
    where
        F: Frontier,
        C: Corpus,
    {
        let page = corpus.fetch(url);
        let tokens = page_tokens(&page).unwrap_or_default();
        self.stats.record_page(url, &tokens, &self.stopwords);

        let mut accepted = 0;
        for link in extract_links(&page) {
            match self.engine.is_fetchable(&link, corpus) {
                Verdict::Accept => {
                    if corpus.has_local_copy(&link) {
                        frontier.add_url(link);
                        accepted += 1;
                    }
                }
                Verdict::Reject(reason) => self.stats.record_trap(&link, reason),
            }
        }

        self.stats.record_outlinks(url, accepted);
        accepted
    }

    /// Summarize the run
    pub fn report<F: Frontier>(&self, frontier: &F) -> RunReport {
        let store = self.engine.state().store();

        RunReport {
            pages_fetched: self.stats.pages_fetched(),
            most_outlinks: self.stats.most_outlinks().cloned(),
            longest_page: self.stats.longest_page().cloned(),
            subdomains: count_subdomains(frontier.known_urls()),
            top_words: self.stats.vocabulary().top(self.top_words),
            traps: self.stats.traps().to_vec(),
            whitelisted_buckets: bucket_names(store.whitelist()),
            blacklisted_buckets: bucket_names(store.blacklist()),
        }
    }

    pub fn engine(&self) -> &TrapEngine {
        &self.engine
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }
}

fn bucket_names(keys: Vec<&BucketKey>) -> Vec<String> {
    keys.iter().map(|key| key.to_string()).collect()
}
