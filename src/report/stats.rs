// src/report/stats.rs
// =============================================================================
// Run statistics gathered while crawling, and the report built from them.
//
// Tracked per run:
// - the page with the most accepted out-links (strictly greater wins, so the
//   first page to reach a count keeps the title)
// - the page with the most words
// - a global vocabulary of non-stopword tokens, remembering first-seen order
//   so equal counts rank in the order the words were first met
// - every rejected link with the reason it was rejected
// =============================================================================

use super::stopwords::Stopwords;
use crate::page::RejectReason;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use url::Url;

/// A page and a count attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageCount {
    pub url: String,
    pub count: usize,
}

/// One entry of the word-frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// A rejected link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrapRecord {
    pub url: String,
    #[serde(flatten)]
    pub reason: RejectReason,
}

/// Word counts with first-seen order
#[derive(Debug, Default)]
pub struct Vocabulary {
    // word -> (count, first-seen rank)
    counts: HashMap<String, (usize, usize)>,
}

impl Vocabulary {
    /// Count the tokens of one page, skipping stopwords and pure punctuation
    pub fn record<'a, I>(&mut self, tokens: I, stopwords: &Stopwords)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for token in tokens {
            if stopwords.contains(token) || !token.chars().any(char::is_alphanumeric) {
                continue;
            }
            let rank = self.counts.len();
            self.counts.entry(token.clone()).or_insert((0, rank)).0 += 1;
        }
    }

    /// The `n` most frequent words, ties in first-seen order
    pub fn top(&self, n: usize) -> Vec<WordCount> {
        let mut entries: Vec<(&String, &(usize, usize))> = self.counts.iter().collect();
        entries.sort_by(|(_, (count_a, rank_a)), (_, (count_b, rank_b))| {
            count_b.cmp(count_a).then(rank_a.cmp(rank_b))
        });

        entries
            .into_iter()
            .take(n)
            .map(|(word, (count, _))| WordCount {
                word: word.clone(),
                count: *count,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Everything the orchestrator learns during one run
#[derive(Debug, Default)]
pub struct RunStats {
    pages_fetched: usize,
    most_outlinks: Option<PageCount>,
    longest_page: Option<PageCount>,
    vocabulary: Vocabulary,
    traps: Vec<TrapRecord>,
    trap_urls: HashSet<String>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Word count and vocabulary for one fetched page
    pub fn record_page(&mut self, url: &str, tokens: &[String], stopwords: &Stopwords) {
        self.pages_fetched += 1;

        if tokens.len() > self.longest_page.as_ref().map_or(0, |page| page.count) {
            self.longest_page = Some(PageCount {
                url: url.to_string(),
                count: tokens.len(),
            });
        }

        self.vocabulary.record(tokens, stopwords);
    }

    /// Accepted out-links of one page
    pub fn record_outlinks(&mut self, url: &str, accepted: usize) {
        if accepted > self.most_outlinks.as_ref().map_or(0, |page| page.count) {
            self.most_outlinks = Some(PageCount {
                url: url.to_string(),
                count: accepted,
            });
        }
    }

    /// A rejected link; each URL is logged once, with its first reason
    pub fn record_trap(&mut self, url: &str, reason: RejectReason) {
        if self.trap_urls.insert(url.to_string()) {
            self.traps.push(TrapRecord {
                url: url.to_string(),
                reason,
            });
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn most_outlinks(&self) -> Option<&PageCount> {
        self.most_outlinks.as_ref()
    }

    pub fn longest_page(&self) -> Option<&PageCount> {
        self.longest_page.as_ref()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn traps(&self) -> &[TrapRecord] {
        &self.traps
    }
}

/// End-of-run summary
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub pages_fetched: usize,
    pub most_outlinks: Option<PageCount>,
    pub longest_page: Option<PageCount>,
    /// Host -> number of known URLs on it
    pub subdomains: BTreeMap<String, usize>,
    pub top_words: Vec<WordCount>,
    pub traps: Vec<TrapRecord>,
    pub whitelisted_buckets: Vec<String>,
    pub blacklisted_buckets: Vec<String>,
}

impl RunReport {
    /// Near-duplicate rejections only, with their scores
    pub fn removed(&self) -> impl Iterator<Item = (&str, f64)> {
        self.traps.iter().filter_map(|trap| match trap.reason {
            RejectReason::NearDuplicate { similarity } => Some((trap.url.as_str(), similarity)),
            _ => None,
        })
    }
}

/// Count URLs per host; unparsable URLs are skipped
pub fn count_subdomains<'a, I>(urls: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for url in urls {
        if let Some(host) = Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
            *counts.entry(host).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tokenize;

    #[test]
    fn test_most_outlinks_first_writer_wins_ties() {
        let mut stats = RunStats::new();
        stats.record_outlinks("a", 0);
        assert!(stats.most_outlinks().is_none());

        stats.record_outlinks("b", 3);
        stats.record_outlinks("c", 3);
        stats.record_outlinks("d", 2);
        assert_eq!(
            stats.most_outlinks(),
            Some(&PageCount { url: "b".to_string(), count: 3 })
        );

        stats.record_outlinks("e", 4);
        assert_eq!(stats.most_outlinks().unwrap().url, "e");
    }

    #[test]
    fn test_longest_page() {
        let stopwords = Stopwords::english();
        let mut stats = RunStats::new();
        stats.record_page("short", &tokenize("one two"), &stopwords);
        stats.record_page("long", &tokenize("one two three four"), &stopwords);
        stats.record_page("tie", &tokenize("five six seven eight"), &stopwords);

        assert_eq!(stats.longest_page().unwrap().url, "long");
        assert_eq!(stats.longest_page().unwrap().count, 4);
        assert_eq!(stats.pages_fetched(), 3);
    }

    #[test]
    fn test_vocabulary_skips_stopwords_and_punctuation() {
        let mut vocab = Vocabulary::default();
        vocab.record(&tokenize("The crawler and the frontier | crawler"), &Stopwords::english());

        let top = vocab.top(10);
        assert_eq!(
            top,
            vec![
                WordCount { word: "crawler".to_string(), count: 2 },
                WordCount { word: "frontier".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_vocabulary_ties_keep_first_seen_order() {
        let mut vocab = Vocabulary::default();
        let stopwords = Stopwords::default();
        vocab.record(&tokenize("zeta alpha mid"), &stopwords);
        vocab.record(&tokenize("mid"), &stopwords);

        let words: Vec<String> = vocab.top(3).into_iter().map(|w| w.word).collect();
        assert_eq!(words, vec!["mid", "zeta", "alpha"]);
        assert_eq!(vocab.top(1).len(), 1);
    }

    #[test]
    fn test_traps_logged_once() {
        let mut stats = RunStats::new();
        stats.record_trap("x", RejectReason::TooLong);
        stats.record_trap("x", RejectReason::AlreadyRejected);
        assert_eq!(stats.traps().len(), 1);
        assert_eq!(stats.traps()[0].reason, RejectReason::TooLong);
    }

    #[test]
    fn test_count_subdomains() {
        let counts = count_subdomains([
            "https://www.ics.uci.edu/a",
            "https://www.ics.uci.edu/b",
            "https://vision.ics.uci.edu/",
            "not a url",
        ]);
        assert_eq!(counts.get("www.ics.uci.edu"), Some(&2));
        assert_eq!(counts.get("vision.ics.uci.edu"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
