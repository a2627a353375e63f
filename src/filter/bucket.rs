// src/filter/bucket.rs
// =============================================================================
// Path buckets: the directory-level grouping used for duplicate tracking.
//
// A bucket key is the URL path with its final segment removed:
//   /docs/page1.html -> /docs
//   /docs/           -> /docs
//   /index.html      -> ""      (the root bucket)
//
// Only the path takes part. Query and fragment never change the bucket, and
// neither does the host.
// =============================================================================

use serde::Serialize;
use std::fmt;
use url::Url;

/// Key of one path bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BucketKey(String);

impl BucketKey {
    /// Bucket of a parsed URL
    pub fn from_url(url: &Url) -> Self {
        Self::from_path(url.path())
    }

    /// Bucket of a raw path
    pub fn from_path(path: &str) -> Self {
        match path.rfind('/') {
            Some(idx) => BucketKey(path[..idx].to_string()),
            None => BucketKey(String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}
