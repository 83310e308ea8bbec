//! Integration tests for the crawler
//!
//! The in-memory graph tests drive the engine through a `PageParser` that
//! records every fetch, so visitation properties can be checked exactly.
//! The HTTP tests use wiremock to serve real HTML end-to-end.

use ripple_count::clock::{Clock, ManualClock};
use ripple_count::config::load_config;
use ripple_count::crawler::{
    build_engine, CrawlEngine, EngineSettings, HtmlPageParser, PageParser, PageResult, WebCrawler,
};
use ripple_count::output::write_result;
use ripple_count::url::PatternSet;
use ripple_count::CrawlerError;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A page of the in-memory web
#[derive(Clone, Default)]
struct FakePage {
    words: HashMap<String, u64>,
    links: Vec<String>,
}

/// In-memory web that counts fetches per URL
///
/// URLs with no page fail like an HTTP 404. Every fetch can optionally
/// advance a manual clock.
#[derive(Default)]
struct FakeWeb {
    pages: HashMap<String, FakePage>,
    fetches: Mutex<HashMap<String, usize>>,
    clock: Option<(Arc<ManualClock>, Duration)>,
}

impl FakeWeb {
    fn page(mut self, url: &str, words: &[(&str, u64)], links: &[&str]) -> Self {
        self.pages.insert(
            url.to_string(),
            FakePage {
                words: words.iter().map(|(w, c)| (w.to_string(), *c)).collect(),
                links: links.iter().map(|l| l.to_string()).collect(),
            },
        );
        self
    }

    fn ticking(mut self, clock: Arc<ManualClock>, per_fetch: Duration) -> Self {
        self.clock = Some((clock, per_fetch));
        self
    }
}

/// Shared handle so the test can inspect fetches after the engine owns the parser
#[derive(Clone)]
struct FakeParser(Arc<FakeWeb>);

impl FakeParser {
    fn fetch_counts(&self) -> HashMap<String, usize> {
        self.0.fetches.lock().unwrap().clone()
    }

    fn total_fetches(&self) -> usize {
        self.fetch_counts().values().sum()
    }
}

impl PageParser for FakeParser {
    fn parse(&self, url: &str) -> impl Future<Output = Result<PageResult, CrawlerError>> + Send {
        *self
            .0
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        if let Some((clock, per_fetch)) = &self.0.clock {
            clock.advance(*per_fetch);
        }

        let result = match self.0.pages.get(url) {
            Some(page) => Ok(PageResult {
                word_counts: page.words.clone(),
                links: page.links.clone(),
            }),
            None => Err(CrawlerError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        };
        async move { result }
    }
}

fn settings(max_depth: u32, popular_word_count: usize, workers: usize) -> EngineSettings {
    EngineSettings {
        max_depth,
        timeout: Duration::from_secs(60),
        popular_word_count,
        ignored_urls: PatternSet::default(),
        parallelism: workers,
        hardware_parallelism: workers,
    }
}

fn engine(web: FakeWeb, settings: EngineSettings) -> (CrawlEngine<FakeParser>, FakeParser) {
    let parser = FakeParser(Arc::new(web));
    let engine = CrawlEngine::new(settings, parser.clone()).expect("Failed to start engine");
    (engine, parser)
}

fn seeds(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

fn sorted_urls(counts: &HashMap<String, usize>) -> Vec<String> {
    let mut urls: Vec<String> = counts.keys().cloned().collect();
    urls.sort();
    urls
}

/// Densely connected web: every page links to several others and back to
/// page 0, so most pages are discovered along many concurrent paths.
fn dense_web(size: usize) -> FakeWeb {
    let mut web = FakeWeb::default();
    for i in 0..size {
        let url = format!("p{}", i);
        let links: Vec<String> = [(i * 7 + 1) % size, (i * 3 + 2) % size, (i + 1) % size, 0]
            .iter()
            .map(|n| format!("p{}", n))
            .collect();
        let link_refs: Vec<&str> = links.iter().map(String::as_str).collect();
        let bucket = format!("bucket{}", i % 5);
        web = web.page(
            &url,
            &[("common", 1), (bucket.as_str(), (i % 3 + 1) as u64)],
            &link_refs,
        );
    }
    web
}

#[test]
fn test_two_hop_scenario() {
    let web = FakeWeb::default()
        .page("A", &[("apple", 2)], &["B", "C"])
        .page("B", &[("banana", 1)], &["A", "D"])
        .page("C", &[("cherry", 1)], &[])
        .page("D", &[("date", 5)], &[]);
    let (engine, parser) = engine(web, settings(2, 10, 4));

    let result = engine.crawl(&seeds(&["A"]));

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(sorted_urls(&parser.fetch_counts()), vec!["A", "B", "C"]);
    assert_eq!(result.count_of("apple"), Some(2));
    assert_eq!(result.count_of("date"), None);
}

#[test]
fn test_zero_depth_never_fetches() {
    let web = FakeWeb::default().page("A", &[("apple", 1)], &[]);
    let (engine, parser) = engine(web, settings(0, 10, 2));

    let result = engine.crawl(&seeds(&["A", "B", "C"]));

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
    assert_eq!(parser.total_fetches(), 0);
}

#[test]
fn test_each_url_fetched_once_across_concurrent_paths() {
    let (engine, parser) = engine(dense_web(60), settings(61, 100, 8));

    let result = engine.crawl(&seeds(&["p0", "p5", "p0", "p17"]));

    let fetches = parser.fetch_counts();
    assert!(fetches.values().all(|&n| n == 1), "duplicate fetch: {:?}", fetches);
    assert_eq!(fetches.len(), result.urls_visited());
    assert_eq!(result.urls_visited(), 60);
    assert_eq!(result.count_of("common"), Some(60));
}

#[test]
fn test_single_worker_and_many_workers_agree() {
    let (single, _) = engine(dense_web(40), settings(41, 100, 1));
    let (many, _) = engine(dense_web(40), settings(41, 100, 8));

    let seed_list = seeds(&["p3"]);
    let a = single.crawl(&seed_list);
    let b = many.crawl(&seed_list);

    assert_eq!(single.workers(), 1);
    assert_eq!(a, b);

    // Totals are the plain sum over pages: bucket k collects pages i with i % 5 == k
    let expected_bucket0: u64 = (0..40).filter(|i| i % 5 == 0).map(|i| (i % 3 + 1) as u64).sum();
    assert_eq!(a.count_of("bucket0"), Some(expected_bucket0));
    assert_eq!(a.count_of("common"), Some(40));
}

#[test]
fn test_ignored_urls_never_fetched_or_counted() {
    let web = FakeWeb::default()
        .page(
            "https://site.com/",
            &[("home", 1)],
            &["https://site.com/private/x", "https://site.com/public"],
        )
        .page("https://site.com/private/x", &[("secret", 1)], &[])
        .page("https://site.com/public", &[("open", 1)], &["https://site.com/private/y"]);
    let mut s = settings(5, 10, 2);
    s.ignored_urls = PatternSet::new(&["https://site\\.com/private/.*"]).unwrap();
    let (engine, parser) = engine(web, s);

    let result = engine.crawl(&seeds(&["https://site.com/", "https://site.com/private/x"]));

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(
        sorted_urls(&parser.fetch_counts()),
        vec!["https://site.com/", "https://site.com/public"]
    );
    assert_eq!(result.count_of("secret"), None);
}

#[test]
fn test_failed_page_is_visited_leaf_without_retry() {
    // "broken" has no page, so every fetch of it fails
    let web = FakeWeb::default()
        .page("root", &[("ok", 1)], &["broken", "other"])
        .page("other", &[("ok", 1)], &["broken"]);
    let (engine, parser) = engine(web, settings(4, 10, 4));

    let result = engine.crawl(&seeds(&["root", "broken"]));

    assert_eq!(result.urls_visited(), 3);
    assert_eq!(parser.fetch_counts()["broken"], 1);
    assert_eq!(result.count_of("ok"), Some(2));
    assert_eq!(result.word_counts().len(), 1);
}

#[test]
fn test_deadline_stops_new_fetches() {
    let clock = Arc::new(ManualClock::new());
    let mut web = FakeWeb::default();
    for i in 0..10 {
        let next = format!("c{}", i + 1);
        web = web.page(&format!("c{}", i), &[("link", 1)], &[next.as_str()]);
    }
    let web = web.ticking(clock.clone(), Duration::from_secs(1));

    let mut s = settings(50, 10, 2);
    s.timeout = Duration::from_secs(3);
    let parser = FakeParser(Arc::new(web));
    let engine = CrawlEngine::with_clock(s, parser.clone(), clock.clone()).unwrap();

    let started = clock.now();
    let result = engine.crawl(&seeds(&["c0"]));

    // Fetches start at t=0s, 1s and 2s; the task reaching t=3s is pruned
    assert_eq!(result.urls_visited(), 3);
    assert_eq!(sorted_urls(&parser.fetch_counts()), vec!["c0", "c1", "c2"]);
    assert_eq!(result.count_of("link"), Some(3));
    assert_eq!(clock.now() - started, Duration::from_secs(3));
}

#[test]
fn test_past_deadline_returns_empty_result() {
    let web = FakeWeb::default().page("A", &[("apple", 1)], &["A"]);
    let mut s = settings(10, 10, 2);
    s.timeout = Duration::ZERO;
    let (engine, parser) = engine(web, s);

    let result = engine.crawl(&seeds(&["A"]));

    assert_eq!(result.urls_visited(), 0);
    assert!(result.word_counts().is_empty());
    assert_eq!(parser.total_fetches(), 0);
}

#[test]
fn test_result_is_ranked_and_capped() {
    let web = FakeWeb::default()
        .page("A", &[("zz", 3), ("aaaa", 3), ("bbbb", 3), ("top", 9), ("low", 1)], &["B"])
        .page("B", &[("low", 1)], &[]);
    let (engine, _) = engine(web, settings(2, 4, 2));

    let result = engine.crawl(&seeds(&["A"]));

    let words: Vec<&str> = result.word_counts().iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(words, vec!["top", "aaaa", "bbbb", "zz"]);
    assert_eq!(result.word_counts().len(), 4);
}

/// HTML response wiremock serves with the right content type
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html")
}

#[test]
fn test_full_http_crawl() {
    // The mock server lives on its own runtime; the engine brings its own pool
    let rt = tokio::runtime::Runtime::new().expect("Failed to start runtime");
    let mock_server = rt.block_on(MockServer::start());

    rt.block_on(async {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html(
                r#"<html><head><title>Home</title></head><body>
                <p>rust crawler rust</p>
                <a href="/a"></a><a href="/b"></a><a href="/missing"></a><a href="/data.json"></a>
                </body></html>"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(html(
                r#"<html><body><p>Rust async</p><a href="/"></a><a href="/b"></a></body></html>"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(html(
                r#"<html><body><p>crawler, tokio!</p><a href="/a"></a></body></html>"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"rust": 100}"#, "application/json"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    });

    let parser = HtmlPageParser::new(Duration::from_secs(5), PatternSet::default())
        .expect("Failed to build parser");
    let mut s = settings(3, 3, 4);
    s.timeout = Duration::from_secs(30);
    let engine = CrawlEngine::new(s, parser).expect("Failed to start engine");

    let result = engine.crawl(&[format!("{}/", mock_server.uri())]);

    // Failed and non-HTML pages still count as visited
    assert_eq!(result.urls_visited(), 5);
    assert_eq!(
        result.word_counts(),
        &[
            ("rust".to_string(), 3),
            ("crawler".to_string(), 2),
            ("async".to_string(), 1),
        ]
    );

    rt.block_on(mock_server.verify());
}

#[test]
fn test_crawl_from_config_file_with_file_urls() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.html");
    let about = dir.path().join("about.html");
    let skipped = dir.path().join("skipped.html");

    std::fs::write(
        &index,
        r#"<html><body>
            <p>The crab and the crab</p>
            <a href="about.html"></a><a href="skipped.html"></a>
        </body></html>"#,
    )
    .unwrap();
    std::fs::write(
        &about,
        r#"<html><body><p>The ferris crab</p><a href="index.html"></a></body></html>"#,
    )
    .unwrap();
    std::fs::write(&skipped, r#"<html><body><p>hidden words</p></body></html>"#).unwrap();

    let index_url = url::Url::from_file_path(&index).unwrap().to_string();
    let config_json = serde_json::json!({
        "startPages": [index_url],
        "ignoredUrls": [".*/skipped\\.html"],
        "ignoredWords": ["the", "and"],
        "parallelism": 2,
        "maxDepth": 3,
        "timeoutSeconds": 10,
        "popularWordCount": 5,
    });
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, config_json.to_string()).unwrap();

    let config = load_config(&config_path).expect("Failed to load config");
    let engine = build_engine(&config, 4).expect("Failed to build engine");
    assert_eq!(engine.workers(), 2);

    let result = engine.crawl(&config.start_pages);

    assert_eq!(result.urls_visited(), 2);
    assert_eq!(
        result.word_counts(),
        &[("crab".to_string(), 3), ("ferris".to_string(), 1)]
    );

    let result_path = dir.path().join("result.json");
    write_result(&result, &result_path).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&result_path).unwrap()).unwrap();
    assert_eq!(written["urlsVisited"], 2);
    assert_eq!(written["wordCounts"]["crab"], 3);
}

#[test]
fn test_distinct_pages_counted_once_per_invocation() {
    let (engine, parser) = engine(dense_web(10), settings(11, 5, 3));

    let first = engine.crawl(&seeds(&["p0"]));
    let second = engine.crawl(&seeds(&["p0"]));

    assert_eq!(first.urls_visited(), 10);
    assert_eq!(second.urls_visited(), 10);
    let fetched: HashSet<_> = parser.fetch_counts().into_keys().collect();
    assert_eq!(fetched.len(), 10);
    assert!(parser.fetch_counts().values().all(|&n| n == 2));
}
