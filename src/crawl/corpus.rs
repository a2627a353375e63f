// src/crawl/corpus.rs
// =============================================================================
// The fetch collaborator: turns a URL into previously retrieved content.
//
// The engine never talks to the network. Whatever feeds it pages implements
// the `Corpus` trait. Two implementations ship with the crate:
// - MemoryCorpus: a HashMap, handy for tests and embedding
// - DirectoryCorpus: a crawl dump on disk, described by an `index.json`
//
// index.json layout:
//   {
//     "https://example.com/docs/a.html": {
//       "file": "pages/0001.html",
//       "final_url": "https://example.com/docs/a.html",
//       "content_type": "text/html"
//     }
//   }
//
// Rust concepts:
// - Traits: one contract, several backing stores
// - Cell: lets a `&self` method bump a counter
// =============================================================================

use crate::error::{Error, Result};
use crate::page::PageRecord;
use serde::Deserialize;
use std::cell::Cell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source of already-fetched pages
pub trait Corpus {
    /// Resolve a URL to its stored page. Never fails: a URL with nothing
    /// behind it comes back with `content: None`.
    fn fetch(&self, url: &str) -> PageRecord;

    /// Whether the corpus can actually serve this URL
    fn has_local_copy(&self, url: &str) -> bool;
}

/// In-memory corpus keyed by requested URL
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    pages: HashMap<String, PageRecord>,
    fetches: Cell<usize>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a page
    pub fn insert(&mut self, page: PageRecord) {
        self.pages.insert(page.url.clone(), page);
    }

    /// Shorthand for an HTML page without redirect
    pub fn insert_html(&mut self, url: &str, html: &str) {
        self.insert(PageRecord::html(url, html));
    }

    /// How many times `fetch` was called so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl Corpus for MemoryCorpus {
    fn fetch(&self, url: &str) -> PageRecord {
        self.fetches.set(self.fetches.get() + 1);
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(|| PageRecord::missing(url))
    }

    fn has_local_copy(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }
}

/// One line of a crawl dump's index.json
#[derive(Debug, Clone, Deserialize)]
struct DumpEntry {
    /// Body file, relative to the dump directory
    file: PathBuf,
    #[serde(default)]
    final_url: Option<String>,
    #[serde(default)]
    content_type: Option<String>,
}

/// A crawl dump on disk
#[derive(Debug)]
pub struct DirectoryCorpus {
    root: PathBuf,
    entries: HashMap<String, DumpEntry>,
}

impl DirectoryCorpus {
    /// Name of the manifest inside the dump directory
    pub const INDEX_FILE: &'static str = "index.json";

    /// Open a dump directory and read its manifest
    pub fn open(root: &Path) -> Result<Self> {
        let index_path = root.join(Self::INDEX_FILE);
        if !index_path.exists() {
            return Err(Error::Corpus(format!(
                "No {} in {}",
                Self::INDEX_FILE,
                root.display()
            )));
        }

        let content = std::fs::read_to_string(&index_path)?;
        let entries: HashMap<String, DumpEntry> = serde_json::from_str(&content)?;
        debug!("Loaded {} corpus entries from {:?}", entries.len(), index_path);

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Corpus for DirectoryCorpus {
    fn fetch(&self, url: &str) -> PageRecord {
        let Some(entry) = self.entries.get(url) else {
            return PageRecord::missing(url);
        };

        let path = self.root.join(&entry.file);
        let content = match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Failed to read {:?} for {}: {}", path, url, e);
                None
            }
        };

        let is_redirected = entry
            .final_url
            .as_deref()
            .is_some_and(|final_url| final_url != url);

        PageRecord {
            url: url.to_string(),
            final_url: entry.final_url.clone(),
            is_redirected,
            content,
            content_type: entry.content_type.clone(),
        }
    }

    fn has_local_copy(&self, url: &str) -> bool {
        self.entries
            .get(url)
            .is_some_and(|entry| self.root.join(&entry.file).is_file())
    }
}
