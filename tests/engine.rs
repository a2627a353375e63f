//! Integration tests for the trap engine
//!
//! These drive `TrapEngine::is_fetchable` through the public API only, with
//! an in-memory corpus standing in for the fetcher.

use crawl_sieve::crawl::MemoryCorpus;
use crawl_sieve::dedup::BucketStatus;
use crawl_sieve::filter::BucketKey;
use crawl_sieve::{Config, RejectReason, TrapEngine, Verdict};

/// `count` distinct words starting at word number `start`, wrapped in a page
fn page(start: usize, count: usize) -> String {
    let text = (start..start + count)
        .map(|i| format!("term{}", i))
        .collect::<Vec<_>>()
        .join(" ");
    format!("<html><head><title>t</title></head><body><p>{}</p></body></html>", text)
}

fn engine() -> TrapEngine {
    TrapEngine::new(&Config::default())
}

#[test]
fn test_shape_rejections_need_no_fetch() {
    let corpus = MemoryCorpus::new();
    let mut engine = engine();

    let cases = [
        ("mailto:someone@a.com", RejectReason::Scheme),
        ("ftp://a.com/file", RejectReason::Scheme),
        ("http://a.com/paper.PDF", RejectReason::BinaryExtension),
        ("http://a.com/a b", RejectReason::Whitespace),
        ("http://a.com/list?a=1&b=2&c=3&d=4", RejectReason::TooManyParams),
        ("http://a.com/page#content-main", RejectReason::InPageFragment),
        ("http://a.com/page?sort=asc", RejectReason::TrapQueryKey),
        ("http://a.com/view/pid=5", RejectReason::IdInPath),
        ("http://a.com/y/m/y/m/y/m", RejectReason::RepeatedSegment),
        ("http://a.com/1/2/3/4/5/6/7/8/9/10/11", RejectReason::TooDeep),
        ("not a url", RejectReason::Unparsable),
    ];

    for (url, expected) in cases {
        assert_eq!(
            engine.is_fetchable(url, &corpus),
            Verdict::Reject(expected),
            "wrong verdict for {}",
            url
        );
    }

    assert_eq!(corpus.fetch_count(), 0);
}

#[test]
fn test_long_url_rejected() {
    let corpus = MemoryCorpus::new();
    let url = format!("http://a.com/{}", "x".repeat(80));

    assert_eq!(
        engine().is_fetchable(&url, &corpus),
        Verdict::Reject(RejectReason::TooLong)
    );
}

#[test]
fn test_first_page_of_bucket_accepted() {
    let mut corpus = MemoryCorpus::new();
    corpus.insert_html("http://a.com/docs/intro.html", &page(0, 30));
    let mut engine = engine();

    assert!(engine.is_fetchable("http://a.com/docs/intro.html", &corpus).is_accept());
    assert_eq!(
        engine.state().bucket_status(&BucketKey::from_path("/docs/intro.html")),
        Some(BucketStatus::Undetermined)
    );
}

#[test]
fn test_near_duplicate_is_cached() {
    let mut corpus = MemoryCorpus::new();
    corpus.insert_html("http://a.com/d/0", &page(0, 30));
    corpus.insert_html("http://a.com/d/1", &page(0, 30));
    let mut engine = engine();

    assert!(engine.is_fetchable("http://a.com/d/0", &corpus).is_accept());
    match engine.is_fetchable("http://a.com/d/1", &corpus) {
        Verdict::Reject(RejectReason::NearDuplicate { similarity }) => {
            assert!((similarity - 1.0).abs() < f64::EPSILON)
        }
        other => panic!("expected a near-duplicate, got {:?}", other),
    }
    let fetched = corpus.fetch_count();

    // Asked again: answered from the rejection cache
    assert_eq!(
        engine.is_fetchable("http://a.com/d/1", &corpus),
        Verdict::Reject(RejectReason::AlreadyRejected)
    );
    assert_eq!(corpus.fetch_count(), fetched);
    assert_eq!(engine.state().rejected_count(), 1);
}

#[test]
fn test_whitelisted_bucket_skips_fetch() {
    let mut corpus = MemoryCorpus::new();
    for i in 0..9 {
        corpus.insert_html(&format!("http://a.com/blog/{}", i), &page(i * 100, 30));
    }
    let mut engine = engine();

    for i in 0..9 {
        let url = format!("http://a.com/blog/{}", i);
        assert!(engine.is_fetchable(&url, &corpus).is_accept(), "{} rejected", url);
    }
    let blog = BucketKey::from_path("/blog/0");
    assert_eq!(engine.state().bucket_status(&blog), Some(BucketStatus::Whitelisted));
    assert_eq!(corpus.fetch_count(), 9);

    // Tenth page is not even in the corpus, yet accepted without a fetch
    assert!(engine.is_fetchable("http://a.com/blog/9", &corpus).is_accept());
    assert_eq!(corpus.fetch_count(), 9);
}

#[test]
fn test_blacklisted_bucket_skips_fetch() {
    let mut corpus = MemoryCorpus::new();
    for i in 0..10 {
        corpus.insert_html(&format!("http://a.com/cal/{}", i), &page(0, 30));
    }
    let mut engine = engine();

    assert!(engine.is_fetchable("http://a.com/cal/0", &corpus).is_accept());
    for i in 1..9 {
        let url = format!("http://a.com/cal/{}", i);
        assert!(!engine.is_fetchable(&url, &corpus).is_accept());
    }
    let cal = BucketKey::from_path("/cal/0");
    assert_eq!(engine.state().bucket_status(&cal), Some(BucketStatus::Blacklisted));
    assert_eq!(corpus.fetch_count(), 9);

    assert_eq!(
        engine.is_fetchable("http://a.com/cal/9", &corpus),
        Verdict::Reject(RejectReason::Blacklisted)
    );
    assert_eq!(corpus.fetch_count(), 9);
}

#[test]
fn test_missing_content_rejected_and_cached() {
    let corpus = MemoryCorpus::new();
    let mut engine = engine();

    assert_eq!(
        engine.is_fetchable("http://a.com/gone.html", &corpus),
        Verdict::Reject(RejectReason::NoContent)
    );
    assert_eq!(
        engine.is_fetchable("http://a.com/gone.html", &corpus),
        Verdict::Reject(RejectReason::AlreadyRejected)
    );
    assert_eq!(corpus.fetch_count(), 1);
}

#[test]
fn test_domain_scope_from_config() {
    let config = Config::from_toml(
        r#"
        [filter]
        domain_scope = ["ics.uci.edu"]
        "#,
    )
    .unwrap();
    let mut corpus = MemoryCorpus::new();
    corpus.insert_html("http://www.ics.uci.edu/about", &page(0, 10));
    let mut engine = TrapEngine::new(&config);

    assert!(engine.is_fetchable("http://www.ics.uci.edu/about", &corpus).is_accept());
    assert_eq!(
        engine.is_fetchable("http://example.com/about", &corpus),
        Verdict::Reject(RejectReason::OutOfScope)
    );
}
