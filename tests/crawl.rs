//! End-to-end crawl over an on-disk corpus
//!
//! Builds a small crawl dump in a temp directory, replays it through the
//! Crawler and checks the report files.

use crawl_sieve::crawl::{Crawler, DirectoryCorpus, Frontier, MemoryFrontier};
use crawl_sieve::report::{open_append, ReportWriter, Stopwords, ACCEPTED_LOG, REMOVED_FILE, SUBDOMAINS_FILE, TRAPS_FILE};
use crawl_sieve::{Config, RejectReason};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ARTICLE: &str = "the crawler reads every article about spiders and webs and then \
                       writes down what it learned about spiders and other spiders";

fn write_page(root: &Path, file: &str, html: &str) {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, html).unwrap();
}

/// A site whose /news/ directory serves the same article under two names
fn build_dump() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write_page(
        root,
        "pages/home.html",
        r#"<html><body>
            <p>welcome home</p>
            <a href="/news/one.html">one</a>
            <a href="/news/two.html">two</a>
            <a href="/logo.png">logo</a>
            <a href="http://blog.site.test/post">blog</a>
        </body></html>"#,
    );
    write_page(root, "pages/one.html", &format!("<p>{}</p>", ARTICLE));
    write_page(root, "pages/two.html", &format!("<p>{}</p>", ARTICLE));
    write_page(root, "pages/post.html", "<p>a short blog post about webs</p>");

    let index = json!({
        "http://site.test/": { "file": "pages/home.html", "content_type": "text/html" },
        "http://site.test/news/one.html": { "file": "pages/one.html" },
        "http://site.test/news/two.html": { "file": "pages/two.html" },
        "http://blog.site.test/post": {
            "file": "pages/post.html",
            "final_url": "http://blog.site.test/post"
        }
    });
    fs::write(
        root.join(DirectoryCorpus::INDEX_FILE),
        serde_json::to_string_pretty(&index).unwrap(),
    )
    .unwrap();

    dir
}

#[test]
fn test_crawl_directory_corpus() {
    let dump = build_dump();
    let out = TempDir::new().unwrap();
    let corpus = DirectoryCorpus::open(dump.path()).unwrap();
    assert_eq!(corpus.len(), 4);

    let mut frontier = MemoryFrontier::with_seeds(["http://site.test/"]);
    let mut crawler = Crawler::new(&Config::default(), Stopwords::english());
    {
        let mut log = open_append(out.path(), ACCEPTED_LOG).unwrap();
        crawler.run(&mut frontier, &corpus, &mut log).unwrap();
    }

    assert!(!frontier.has_next_url());
    assert_eq!(frontier.fetched_count(), 3);

    let downloaded = fs::read_to_string(out.path().join(ACCEPTED_LOG)).unwrap();
    assert_eq!(
        downloaded.lines().collect::<Vec<_>>(),
        vec![
            "http://site.test/",
            "http://site.test/news/one.html",
            "http://blog.site.test/post",
        ]
    );

    let report = crawler.report(&frontier);
    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.subdomains.get("site.test"), Some(&2));
    assert_eq!(report.subdomains.get("blog.site.test"), Some(&1));
    assert_eq!(report.top_words[0].word, "spiders");

    let reasons: Vec<(&str, &RejectReason)> = report
        .traps
        .iter()
        .map(|trap| (trap.url.as_str(), &trap.reason))
        .collect();
    assert!(reasons.contains(&("http://site.test/logo.png", &RejectReason::BinaryExtension)));
    assert!(reasons
        .iter()
        .any(|(url, reason)| *url == "http://site.test/news/two.html"
            && matches!(reason, RejectReason::NearDuplicate { .. })));

    ReportWriter::new(out.path()).write(&report).unwrap();

    let removed = fs::read_to_string(out.path().join(REMOVED_FILE)).unwrap();
    assert_eq!(removed, "http://site.test/news/two.html --Duplication score: 1.000\n");

    let traps = fs::read_to_string(out.path().join(TRAPS_FILE)).unwrap();
    assert_eq!(traps.lines().count(), 2);

    let subdomains = fs::read_to_string(out.path().join(SUBDOMAINS_FILE)).unwrap();
    assert!(subdomains.contains("blog.site.test : 1"));
}

#[test]
fn test_open_without_index_fails() {
    let dir = TempDir::new().unwrap();
    assert!(DirectoryCorpus::open(dir.path()).is_err());
}

#[test]
fn test_report_serializes_to_json() {
    let dump = build_dump();
    let corpus = DirectoryCorpus::open(dump.path()).unwrap();
    let mut frontier = MemoryFrontier::with_seeds(["http://site.test/"]);
    let mut crawler = Crawler::new(&Config::default(), Stopwords::english());
    let mut log = Vec::new();

    crawler.run(&mut frontier, &corpus, &mut log).unwrap();
    let value = serde_json::to_value(crawler.report(&frontier)).unwrap();

    assert_eq!(value["pages_fetched"], 3);
    let reasons: Vec<&str> = value["traps"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|trap| trap["reason"].as_str())
        .collect();
    assert!(reasons.contains(&"binary_extension"));
    assert!(reasons.contains(&"near_duplicate"));
}
