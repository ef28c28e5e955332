//! Integration tests for the crawler
//!
//! These tests use wiremock to serve rendered articles and walk them
//! end-to-end, including cache persistence between runs.

use philo_walk::config::Config;
use philo_walk::{
    cache_key, ArticleSite, CrawlOutcome, Crawler, DeadEndCause, HttpPageSource, TitleCache,
};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.site.base_url = server.uri();
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.timeout_seconds = 5;
    config
}

/// Mounts a rendered article, expecting it to be fetched `times` times
async fn mount_article(server: &MockServer, title: &str, body: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/w/index.php"))
        .and(query_param("action", "render"))
        .and(query_param("title", title))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Runs one walk the way the binary does: load, crawl, save
async fn walk(config: &Config, cache_path: &Path, start: &str) -> CrawlOutcome {
    let site = ArticleSite::from_config(&config.site).expect("Failed to build site");
    let source = HttpPageSource::from_config(config).expect("Failed to build page source");
    let ttl = chrono::Duration::seconds(config.cache.ttl_seconds as i64);

    let mut cache = TitleCache::load(cache_path, ttl);
    let outcome = Crawler::new(source, site, &mut cache)
        .crawl(start, &config.crawl.target, config.crawl.max_steps)
        .await;
    assert!(cache.save(cache_path));

    outcome
}

#[tokio::test]
async fn test_full_walk_to_philosophy() {
    let server = MockServer::start().await;
    let config = create_test_config(&server);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("cache");

    mount_article(
        &server,
        "Socrates",
        r#"<div class="hatnote">Not to be confused with <a href="/wiki/Sokrates">Sokrates</a>.</div>
        <table class="infobox"><tr><td><a href="/wiki/Athens">Athens</a></td></tr></table>
        <p><b>Socrates</b> (<a href="/wiki/Help:IPA">IPA</a>; <a href="/wiki/Attic_Greek">Greek</a>)
        was a <i><a href="/wiki/Sophist">sophist</a></i> critic and an
        <a href="/wiki/Ancient_Greek_philosophy">ancient Greek philosopher</a>.</p>"#,
        1,
    )
    .await;
    mount_article(
        &server,
        "Ancient_Greek_philosophy",
        r#"<p><a href="/wiki/File:Plato.jpg">Plato</a> Ancient Greek philosophy is a period of
        <a href="/wiki/Philosophy">philosophy</a>.</p>"#,
        1,
    )
    .await;

    let outcome = walk(&config, &cache_path, "Socrates").await;
    assert_eq!(outcome, CrawlOutcome::Reached { steps: 2 });
}

#[tokio::test]
async fn test_cache_persists_between_runs() {
    let server = MockServer::start().await;
    let config = create_test_config(&server);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("nested").join("cache");

    // Each page is fetched by the first run only
    mount_article(&server, "A", r#"<p><a href="/wiki/B">B</a></p>"#, 1).await;
    mount_article(&server, "B", r#"<p><a href="/wiki/Philosophy">P</a></p>"#, 1).await;

    let first = walk(&config, &cache_path, "A").await;
    let second = walk(&config, &cache_path, "A").await;

    assert_eq!(first, CrawlOutcome::Reached { steps: 2 });
    assert_eq!(second, first);

    let host = ArticleSite::from_config(&config.site)
        .expect("Failed to build site")
        .host();
    let cache = TitleCache::load(&cache_path, chrono::Duration::hours(1));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&cache_key(&host, "A")), Some(Some("B".to_string())));
}

#[tokio::test]
async fn test_walk_into_cycle() {
    let server = MockServer::start().await;
    let config = create_test_config(&server);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("cache");

    mount_article(&server, "A", r#"<p>First <a href="/wiki/B">B</a></p>"#, 1).await;
    mount_article(&server, "B", r#"<p>Back to <a href="/wiki/A">A</a></p>"#, 1).await;

    let outcome = walk(&config, &cache_path, "A").await;
    assert_eq!(
        outcome,
        CrawlOutcome::Cycle {
            title: "A".to_string(),
            history: vec!["A".to_string(), "B".to_string()],
        }
    );
}

#[tokio::test]
async fn test_missing_article_is_not_cached() {
    let server = MockServer::start().await;
    let config = create_test_config(&server);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("cache");

    mount_article(&server, "A", r#"<p><a href="/wiki/Gone">Gone</a></p>"#, 1).await;
    Mock::given(method("GET"))
        .and(query_param("title", "Gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    // The second run reuses A from the cache but asks for Gone again
    for _ in 0..2 {
        let outcome = walk(&config, &cache_path, "A").await;
        assert_eq!(
            outcome,
            CrawlOutcome::DeadEnd {
                title: "Gone".to_string(),
                cause: DeadEndCause::FetchFailed,
            }
        );
    }
}

#[tokio::test]
async fn test_dead_end_is_cached() {
    let server = MockServer::start().await;
    let config = create_test_config(&server);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("cache");

    mount_article(
        &server,
        "Stub",
        r#"<p>Only <i><a href="/wiki/Italic">italic</a></i> and (<a href="/wiki/Aside">aside</a>).</p>"#,
        1,
    )
    .await;

    for _ in 0..2 {
        let outcome = walk(&config, &cache_path, "Stub").await;
        assert_eq!(
            outcome,
            CrawlOutcome::DeadEnd {
                title: "Stub".to_string(),
                cause: DeadEndCause::NoLink,
            }
        );
    }
}

#[tokio::test]
async fn test_step_limit_from_config() {
    let server = MockServer::start().await;
    let mut config = create_test_config(&server);
    config.crawl.max_steps = Some(1);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("cache");

    mount_article(&server, "A", r#"<p><a href="/wiki/B">B</a></p>"#, 1).await;
    mount_article(&server, "B", r#"<p><a href="/wiki/Philosophy">P</a></p>"#, 0).await;

    let outcome = walk(&config, &cache_path, "A").await;
    assert_eq!(
        outcome,
        CrawlOutcome::StepLimit {
            title: "B".to_string(),
            steps: 1,
        }
    );
}

#[tokio::test]
async fn test_links_to_other_hosts_are_ignored() {
    let server = MockServer::start().await;
    let config = create_test_config(&server);
    let dir = TempDir::new().expect("Failed to create temp dir");
    let cache_path = dir.path().join("cache");

    mount_article(
        &server,
        "A",
        r#"<p><a href="https://example.com/wiki/Elsewhere">elsewhere</a>
        <a href="/wiki/Philosophy">here</a></p>"#,
        1,
    )
    .await;

    let outcome = walk(&config, &cache_path, "A").await;
    assert_eq!(outcome, CrawlOutcome::Reached { steps: 1 });
}
