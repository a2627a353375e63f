// src/filter/shape.rs
// =============================================================================
// URL shape filter: cheap heuristics that catch crawler traps by looking at
// the URL alone.
//
// Checks run in a fixed order and the first failing one decides:
//   1. scheme is http or https
//   2. host is in scope and the path is not a binary/media/archive file
//   3. no literal space
//   4. not longer than max_url_length characters
//   5. at most max_query_params distinct query pairs
//   6. fragment is not a pure in-page anchor
//   7. no session/action/sort/search query keys
//   8. no `id=` in the final segment, no segment repeated too often,
//      not nested too deep
// Then the run state is consulted (read-only):
//   9. whitelisted bucket -> accept, blacklisted bucket -> reject
//  10. URL already rejected by a duplicate check -> reject
// Whatever survives needs a content check by the duplicate classifier.
//
// Rust concepts:
// - Result<Url, RejectReason>: the happy path hands the parsed URL onwards
// - HashSet: distinct query pairs, O(1) denylist lookups
// =============================================================================

use super::bucket::BucketKey;
use crate::config::FilterConfig;
use crate::dedup::BucketStatus;
use crate::page::RejectReason;
use crate::state::EngineState;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Outcome of the shape filter for one URL
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeVerdict {
    /// Bucket already whitelisted, no further work needed
    Accept,
    /// Shape is fine, the bucket still needs a content check
    NeedsContentCheck { bucket: BucketKey },
    /// Trap or otherwise not worth fetching
    Reject(RejectReason),
}

/// Stateless URL classifier built from a `FilterConfig`
#[derive(Debug, Clone)]
pub struct ShapeFilter {
    allowed_schemes: HashSet<String>,
    domain_scope: Vec<String>,
    blocked_extensions: HashSet<String>,
    max_url_length: usize,
    max_query_params: usize,
    blocked_fragments: HashSet<String>,
    blocked_query_keys: HashSet<String>,
    max_segment_repeats: usize,
    max_path_segments: usize,
    reject_id_in_final_segment: bool,
}

impl ShapeFilter {
    pub fn new(config: &FilterConfig) -> Self {
        let lowered = |items: &[String]| -> HashSet<String> {
            items.iter().map(|item| item.to_lowercase()).collect()
        };

        Self {
            allowed_schemes: lowered(&config.allowed_schemes),
            domain_scope: config
                .domain_scope
                .iter()
                .map(|domain| domain.trim_start_matches('.').to_lowercase())
                .collect(),
            blocked_extensions: config
                .blocked_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            max_url_length: config.max_url_length,
            max_query_params: config.max_query_params,
            blocked_fragments: config.blocked_fragments.iter().cloned().collect(),
            blocked_query_keys: lowered(&config.blocked_query_keys),
            max_segment_repeats: config.max_segment_repeats,
            max_path_segments: config.max_path_segments,
            reject_id_in_final_segment: config.reject_id_in_final_segment,
        }
    }

    /// Full classification: shape checks, then bucket status and the
    /// rejection cache in `state`
    pub fn classify(&self, raw: &str, state: &EngineState) -> ShapeVerdict {
        let url = match self.check_shape(raw) {
            Ok(url) => url,
            Err(reason) => return ShapeVerdict::Reject(reason),
        };

        let bucket = BucketKey::from_url(&url);
        match state.bucket_status(&bucket) {
            Some(BucketStatus::Whitelisted) => return ShapeVerdict::Accept,
            Some(BucketStatus::Blacklisted) => {
                return ShapeVerdict::Reject(RejectReason::Blacklisted)
            }
            Some(BucketStatus::Undetermined) | None => {}
        }

        if state.was_rejected(raw) {
            return ShapeVerdict::Reject(RejectReason::AlreadyRejected);
        }

        ShapeVerdict::NeedsContentCheck { bucket }
    }

    /// The URL-only checks (1 through 8). Needs no run state.
    pub fn check_shape(&self, raw: &str) -> Result<Url, RejectReason> {
        let url = Url::parse(raw).map_err(|_| RejectReason::Unparsable)?;

        if !self.allowed_schemes.contains(url.scheme()) {
            return Err(RejectReason::Scheme);
        }

        let host = url.host_str().ok_or(RejectReason::Unparsable)?;
        if !self.in_scope(host) {
            return Err(RejectReason::OutOfScope);
        }
        if self.has_blocked_extension(url.path()) {
            return Err(RejectReason::BinaryExtension);
        }

        if raw.contains(' ') {
            return Err(RejectReason::Whitespace);
        }

        if raw.chars().count() > self.max_url_length {
            return Err(RejectReason::TooLong);
        }

        let pairs: HashSet<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        if pairs.len() > self.max_query_params {
            return Err(RejectReason::TooManyParams);
        }

        if let Some(fragment) = url.fragment() {
            if self.blocked_fragments.contains(fragment) {
                return Err(RejectReason::InPageFragment);
            }
        }

        if pairs
            .iter()
            .any(|(key, _)| self.blocked_query_keys.contains(&key.to_lowercase()))
        {
            return Err(RejectReason::TrapQueryKey);
        }

        self.check_path(url.path())?;

        Ok(url)
    }

    fn in_scope(&self, host: &str) -> bool {
        if self.domain_scope.is_empty() {
            return true;
        }
        let host = host.to_lowercase();
        self.domain_scope.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    fn has_blocked_extension(&self, path: &str) -> bool {
        let last = path.rsplit('/').next().unwrap_or_default();
        match last.rsplit_once('.') {
            Some((_, ext)) => self.blocked_extensions.contains(&ext.to_lowercase()),
            None => false,
        }
    }

    fn check_path(&self, path: &str) -> Result<(), RejectReason> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if self.reject_id_in_final_segment
            && path.rsplit('/').next().is_some_and(|last| last.contains("id="))
        {
            return Err(RejectReason::IdInPath);
        }

        // Calendar and pagination traps: /a/b/a/b/a/b
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for segment in &segments {
            let count = counts.entry(*segment).or_insert(0);
            *count += 1;
            if *count > self.max_segment_repeats {
                return Err(RejectReason::RepeatedSegment);
            }
        }

        // Split pieces, not segments: "/a/b/" is three slashes, four pieces
        if path.split('/').count() > self.max_path_segments {
            return Err(RejectReason::TooDeep);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;

    fn filter() -> ShapeFilter {
        ShapeFilter::new(&FilterConfig::default())
    }

    fn scoped(domain: &str) -> ShapeFilter {
        ShapeFilter::new(&FilterConfig {
            domain_scope: vec![domain.to_string()],
            ..FilterConfig::default()
        })
    }

    #[test]
    fn test_plain_url_passes() {
        assert!(filter().check_shape("https://example.com/blog/post.html").is_ok());
        assert!(filter().check_shape("http://example.com/").is_ok());
    }

    #[test]
    fn test_scheme() {
        let f = filter();
        for url in ["ftp://example.com/a", "mailto:a@example.com", "javascript:void(0)"] {
            assert_eq!(f.check_shape(url), Err(RejectReason::Scheme), "{}", url);
        }
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(filter().check_shape("not a url"), Err(RejectReason::Unparsable));
        assert_eq!(filter().check_shape("http://[::1"), Err(RejectReason::Unparsable));
    }

    #[test]
    fn test_binary_extension_case_insensitive() {
        let f = filter();
        for url in [
            "https://example.com/files/report.pdf",
            "https://example.com/img/LOGO.PNG",
            "https://example.com/dl/archive.tar.gz",
            "https://example.com/a.mp4?x=1",
        ] {
            assert_eq!(f.check_shape(url), Err(RejectReason::BinaryExtension), "{}", url);
        }
        // extension must be at the end of the path
        assert!(f.check_shape("https://example.com/pdf/readme.html").is_ok());
    }

    #[test]
    fn test_domain_scope() {
        let f = scoped(".ics.uci.edu");
        assert!(f.check_shape("https://www.ics.uci.edu/about").is_ok());
        assert!(f.check_shape("https://ics.uci.edu/about").is_ok());
        assert_eq!(
            f.check_shape("https://example.com/about"),
            Err(RejectReason::OutOfScope)
        );
        assert_eq!(
            f.check_shape("https://notics.uci.edu/about"),
            Err(RejectReason::OutOfScope)
        );
    }

    #[test]
    fn test_space() {
        assert_eq!(
            filter().check_shape("https://example.com/a page"),
            Err(RejectReason::Whitespace)
        );
    }

    #[test]
    fn test_length_limit() {
        let base = "https://example.com/";
        let ok = format!("{}{}", base, "a".repeat(80 - base.len()));
        let long = format!("{}{}", base, "a".repeat(81 - base.len()));
        assert_eq!(ok.len(), 80);
        assert!(filter().check_shape(&ok).is_ok());
        assert_eq!(filter().check_shape(&long), Err(RejectReason::TooLong));
    }

    #[test]
    fn test_query_param_count() {
        let f = filter();
        assert!(f.check_shape("https://example.com/p?a=1&b=2&c=3").is_ok());
        assert_eq!(
            f.check_shape("https://example.com/p?a=1&b=2&c=3&d=4"),
            Err(RejectReason::TooManyParams)
        );
        // repeated identical pairs count once
        assert!(f.check_shape("https://example.com/p?a=1&a=1&a=1&b=2").is_ok());
    }

    #[test]
    fn test_in_page_fragment() {
        assert_eq!(
            filter().check_shape("https://example.com/p#content-main"),
            Err(RejectReason::InPageFragment)
        );
        assert!(filter().check_shape("https://example.com/p#section-2").is_ok());
    }

    #[test]
    fn test_trap_query_keys() {
        let f = filter();
        for url in [
            "https://example.com/p?session=abc",
            "https://example.com/p?SORT=asc",
            "https://example.com/wiki?do=edit",
            "https://example.com/list?format=txt",
        ] {
            assert_eq!(f.check_shape(url), Err(RejectReason::TrapQueryKey), "{}", url);
        }
    }

    #[test]
    fn test_id_in_final_segment() {
        assert_eq!(
            filter().check_shape("https://example.com/view/id=42"),
            Err(RejectReason::IdInPath)
        );
    }

    #[test]
    fn test_repeated_segments() {
        assert_eq!(
            filter().check_shape("https://example.com/a/b/a/b/a/b"),
            Err(RejectReason::RepeatedSegment)
        );
        assert!(filter().check_shape("https://example.com/a/b/a/b").is_ok());
    }

    #[test]
    fn test_too_deep() {
        let f = filter();
        for url in [
            "https://e.com/1/2/3/4/5/6/7/8/9/10/11",
            "https://e.com/1/2/3/4/5/6/7/8/9/10",
            "https://e.com/1/2/3/4/5/6/7/8/9/",
        ] {
            assert_eq!(f.check_shape(url), Err(RejectReason::TooDeep), "{}", url);
        }
        assert!(f.check_shape("https://e.com/1/2/3/4/5/6/7/8/9").is_ok());
        assert!(f.check_shape("https://e.com/1/2/3/4/5/6/7/8/").is_ok());
    }

    #[test]
    fn test_bucket_short_circuits() {
        let f = filter();
        let mut state = EngineState::default();
        let blog = BucketKey::from_path("/blog/x");
        let trap = BucketKey::from_path("/cal/x");
        state.force_status(blog, BucketStatus::Whitelisted);
        state.force_status(trap, BucketStatus::Blacklisted);

        assert_eq!(
            f.classify("https://example.com/blog/new.html", &state),
            ShapeVerdict::Accept
        );
        assert_eq!(
            f.classify("https://example.com/cal/2024.html", &state),
            ShapeVerdict::Reject(RejectReason::Blacklisted)
        );
        // shape checks still run first
        assert_eq!(
            f.classify("https://example.com/blog/a.pdf", &state),
            ShapeVerdict::Reject(RejectReason::BinaryExtension)
        );
    }

    #[test]
    fn test_rejection_cache() {
        let f = filter();
        let mut state = EngineState::default();
        state.mark_rejected("https://example.com/docs/b.html");

        assert_eq!(
            f.classify("https://example.com/docs/b.html", &state),
            ShapeVerdict::Reject(RejectReason::AlreadyRejected)
        );
        assert_eq!(
            f.classify("https://example.com/docs/c.html", &state),
            ShapeVerdict::NeedsContentCheck {
                bucket: BucketKey::from_path("/docs/c.html")
            }
        );
    }

    #[test]
    fn test_whitelist_checked_before_rejection_cache() {
        let f = filter();
        let mut state = EngineState::default();
        state.mark_rejected("https://example.com/docs/b.html");
        state.force_status(BucketKey::from_path("/docs/x"), BucketStatus::Whitelisted);

        assert_eq!(
            f.classify("https://example.com/docs/b.html", &state),
            ShapeVerdict::Accept
        );
    }
}
