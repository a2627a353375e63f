// src/page.rs
// =============================================================================
// Shared record types: what a fetched page looks like and what the engine
// decides about a link.
//
// Rust concepts:
// - Option<T>: content and content type may legitimately be missing
// - Enums with data: a rejection carries the reason it happened
// =============================================================================

use serde::Serialize;
use std::fmt;

/// A previously retrieved page, as handed over by the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// The URL that was asked for
    pub url: String,
    /// Where the request ended up after redirects, if known
    pub final_url: Option<String>,
    /// Whether `final_url` differs from `url` because of a redirect
    pub is_redirected: bool,
    /// Raw body bytes; `None` when nothing was retrieved
    pub content: Option<Vec<u8>>,
    /// Content type header, if one was recorded
    pub content_type: Option<String>,
}

impl PageRecord {
    /// A record for a URL the corpus knows nothing about
    pub fn missing(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            final_url: None,
            is_redirected: false,
            content: None,
            content_type: None,
        }
    }

    /// A record with HTML content and no redirect
    pub fn html(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            final_url: None,
            is_redirected: false,
            content: Some(body.into()),
            content_type: Some("text/html".to_string()),
        }
    }

    /// The URL relative links on this page resolve against:
    /// the redirect target when there was one, otherwise the requested URL
    pub fn base_url(&self) -> Option<&str> {
        if self.is_redirected {
            self.final_url.as_deref()
        } else if self.url.is_empty() {
            None
        } else {
            Some(&self.url)
        }
    }

    /// Body bytes, treating an empty body the same as a missing one
    pub fn body(&self) -> Option<&[u8]> {
        self.content.as_deref().filter(|bytes| !bytes.is_empty())
    }
}

/// Why a link was not worth fetching
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// URL or host could not be parsed
    Unparsable,
    /// Scheme other than the allowed ones
    Scheme,
    /// Host outside the crawl's domain scope
    OutOfScope,
    /// Path ends in a binary, media or archive extension
    BinaryExtension,
    /// Unescaped space in the URL
    Whitespace,
    /// URL longer than the configured limit
    TooLong,
    /// Too many distinct query parameters
    TooManyParams,
    /// Fragment that only jumps within a page
    InPageFragment,
    /// Query key known to spawn session, sort or search permutations
    TrapQueryKey,
    /// `id=` inside the final path segment
    IdInPath,
    /// Path segment repeated too often, e.g. /a/b/a/b/a/b
    RepeatedSegment,
    /// Path nested deeper than the configured limit
    TooDeep,
    /// Bucket was blacklisted earlier in the run
    Blacklisted,
    /// URL was already rejected by a duplicate check
    AlreadyRejected,
    /// Corpus has no content for the URL
    NoContent,
    /// Content is a near-duplicate of the bucket's representative page
    NearDuplicate { similarity: f64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Unparsable => write!(f, "unparsable url"),
            RejectReason::Scheme => write!(f, "scheme not allowed"),
            RejectReason::OutOfScope => write!(f, "host out of scope"),
            RejectReason::BinaryExtension => write!(f, "binary or media extension"),
            RejectReason::Whitespace => write!(f, "space in url"),
            RejectReason::TooLong => write!(f, "url too long"),
            RejectReason::TooManyParams => write!(f, "too many query parameters"),
            RejectReason::InPageFragment => write!(f, "in-page fragment"),
            RejectReason::TrapQueryKey => write!(f, "trap query key"),
            RejectReason::IdInPath => write!(f, "id= in final segment"),
            RejectReason::RepeatedSegment => write!(f, "repeated path segment"),
            RejectReason::TooDeep => write!(f, "path too deep"),
            RejectReason::Blacklisted => write!(f, "bucket blacklisted"),
            RejectReason::AlreadyRejected => write!(f, "already rejected"),
            RejectReason::NoContent => write!(f, "no content"),
            RejectReason::NearDuplicate { similarity } => {
                write!(f, "near-duplicate (score {:.3})", similarity)
            }
        }
    }
}

/// Final decision for one discovered link
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Reject(RejectReason),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}
