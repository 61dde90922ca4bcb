//! End-to-end pipeline tests: every adapter pointed at one mock server,
//! persistence into the in-memory store.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pressclip_core::clients::ClientConfig;
use pressclip_fetch::{FetchConfig, Pipeline, ScrapeSite};
use pressclip_store::{ArticleStore, MemoryStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server_uri: &str, test_name: &str) -> FetchConfig {
    let cache_dir = std::env::temp_dir().join(format!(
        "pressclip-pipeline-test-{}-{test_name}",
        std::process::id()
    ));
    FetchConfig {
        newsdata_api_key: None,
        newsdata_base_url: server_uri.to_string(),
        google_base_url: server_uri.to_string(),
        language: "pt".to_string(),
        curated_feeds: vec![format!("{server_uri}/feed.xml")],
        scrape_sites: Vec::new(),
        lookback_days: 90,
        newsdata_cap_days: 30,
        search_cache_ttl: Duration::from_secs(3600),
        expand_cache_ttl: Duration::from_secs(3600),
        max_expanded_queries: 5,
        request_timeout_secs: 5,
        scrape_timeout_secs: 5,
        scrape_delay_ms: 0,
        user_agent: "pressclip-test".to_string(),
        cache_dir,
    }
}

fn client(keywords: &str) -> ClientConfig {
    ClientConfig {
        name: "Acme".to_string(),
        keywords: keywords.to_string(),
        domains: None,
        operators: None,
    }
}

fn recent_rfc2822() -> String {
    (Utc::now() - chrono::Duration::days(1)).to_rfc2822()
}

fn google_rss(items: &[(&str, &str)]) -> String {
    let date = recent_rfc2822();
    let body: String = items
        .iter()
        .map(|(title, url)| {
            format!(
                "<item><title>{title}</title><link>{url}</link>\
                 <pubDate>{date}</pubDate><source>Portal Teste</source></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Busca</title>{body}</channel></rss>"#
    )
}

fn curated_rss(items: &[(&str, &str, bool)]) -> String {
    let date = recent_rfc2822();
    let body: String = items
        .iter()
        .map(|(title, url, dated)| {
            let pub_date = if *dated {
                format!("<pubDate>{date}</pubDate>")
            } else {
                String::new()
            };
            format!("<item><title>{title}</title><link>{url}</link>{pub_date}</item>")
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Feed Curado</title>{body}</channel></rss>"#
    )
}

async fn mount_google(server: &MockServer, xml: String) {
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(server)
        .await;
}

async fn mount_feed(server: &MockServer, xml: String) {
    Mock::given(method("GET"))
        .and(path("/feed.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(xml))
        .mount(server)
        .await;
}

#[tokio::test]
async fn one_failing_source_does_not_sink_the_others() {
    let server = MockServer::start().await;

    // The paid API is down.
    Mock::given(method("GET"))
        .and(path("/api/1/latest"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_google(&server, google_rss(&[("Governo faz anúncio", "https://example.com/g-1")])).await;
    mount_feed(
        &server,
        curated_rss(&[("Governo libera verba", "https://example.com/f-1", true)]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/listing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<h3 class="headline"><a href="https://example.com/s-1">Governo publica edital</a></h3>
               <span class="when">01/05/2024 10:00</span>"#,
        ))
        .mount(&server)
        .await;

    let mut cfg = test_config(&server.uri(), "isolation");
    cfg.newsdata_api_key = Some("test-key".to_string());
    cfg.scrape_sites = vec![ScrapeSite {
        url: format!("{}/listing", server.uri()),
        title_selector: "h3.headline".to_string(),
        link_selector: "h3.headline a".to_string(),
        date_selector: "span.when".to_string(),
    }];

    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();
    let report = pipeline.run(&[client("governo")], None).await;

    assert_eq!(report.clients.len(), 1);
    let sources = &report.clients[0].sources;
    assert_eq!(sources.len(), 4);
    for source in sources {
        if source.source == "newsdata" {
            assert!(source.outcome.is_err(), "newsdata should have failed");
        } else {
            assert!(
                source.outcome.is_ok(),
                "{} should have survived: {:?}",
                source.source,
                source.outcome
            );
        }
    }
    assert_eq!(report.total, 3);
    assert_eq!(store.len(), 3);
}

#[tokio::test]
async fn same_url_from_two_sources_is_stored_once() {
    let server = MockServer::start().await;

    mount_google(
        &server,
        google_rss(&[("Governo anuncia plano", "https://example.com/shared")]),
    )
    .await;
    mount_feed(
        &server,
        curated_rss(&[("Governo anuncia plano", "https://example.com/shared", true)]),
    )
    .await;

    let cfg = test_config(&server.uri(), "dedup");
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();
    let report = pipeline.run(&[client("governo")], None).await;

    assert_eq!(report.total, 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.articles()[0].url, "https://example.com/shared");
}

#[tokio::test]
async fn undated_feed_entries_are_dropped() {
    let server = MockServer::start().await;

    mount_google(&server, google_rss(&[])).await;
    mount_feed(
        &server,
        curated_rss(&[
            ("Governo com data", "https://example.com/dated", true),
            ("Governo sem data", "https://example.com/undated", false),
        ]),
    )
    .await;

    let cfg = test_config(&server.uri(), "undated");
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();
    pipeline.run(&[client("governo")], None).await;

    assert_eq!(store.len(), 1);
    let article = &store.articles()[0];
    assert_eq!(article.url, "https://example.com/dated");
    // Source label comes from the feed's own title element.
    assert_eq!(article.source, "Feed Curado");
}

#[tokio::test]
async fn undated_google_items_are_dropped() {
    let server = MockServer::start().await;

    let date = recent_rfc2822();
    let xml = format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>Busca</title>
<item><title>Governo com data</title><link>https://example.com/g-dated</link><pubDate>{date}</pubDate></item>
<item><title>Governo sem data</title><link>https://example.com/g-undated</link></item>
<item><title>Governo com data ruim</title><link>https://example.com/g-bad</link><pubDate>amanhã cedo</pubDate></item>
</channel></rss>"#
    );
    mount_google(&server, xml).await;
    mount_feed(&server, curated_rss(&[])).await;

    let cfg = test_config(&server.uri(), "google-undated");
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();
    pipeline.run(&[client("governo")], None).await;

    assert_eq!(store.len(), 1);
    assert_eq!(store.articles()[0].url, "https://example.com/g-dated");
}

#[tokio::test]
async fn non_matching_feed_titles_are_filtered_out() {
    let server = MockServer::start().await;

    mount_google(&server, google_rss(&[])).await;
    mount_feed(
        &server,
        curated_rss(&[
            ("GOVERNO em maiúsculas", "https://example.com/upper", true),
            ("Assunto sem relação", "https://example.com/other", true),
        ]),
    )
    .await;

    let cfg = test_config(&server.uri(), "keyword-filter");
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();
    pipeline.run(&[client("governo")], None).await;

    assert_eq!(store.len(), 1);
    assert_eq!(store.articles()[0].url, "https://example.com/upper");
}

#[tokio::test]
async fn client_without_usable_keywords_is_skipped() {
    let server = MockServer::start().await;

    let cfg = test_config(&server.uri(), "no-keywords");
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();
    let report = pipeline.run(&[client(" , ,, ")], None).await;

    assert!(report.clients.is_empty());
    assert_eq!(report.total, 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn slug_filter_selects_a_single_client() {
    let server = MockServer::start().await;

    mount_google(&server, google_rss(&[])).await;
    mount_feed(&server, curated_rss(&[])).await;

    let cfg = test_config(&server.uri(), "filter");
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();

    let mut other = client("economia");
    other.name = "Beta Corp".to_string();
    let report = pipeline
        .run(&[client("governo"), other], Some("beta-corp"))
        .await;

    assert_eq!(report.clients.len(), 1);
    assert_eq!(report.clients[0].client, "Beta Corp");
}

#[tokio::test]
async fn stored_articles_are_enriched() {
    let server = MockServer::start().await;

    mount_google(
        &server,
        google_rss(&[("Governo anuncia vacina nova", "https://example.com/e-1")]),
    )
    .await;
    mount_feed(&server, curated_rss(&[])).await;

    let cfg = test_config(&server.uri(), "enrichment");
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(cfg, store.clone() as Arc<dyn ArticleStore>, None).unwrap();
    pipeline.run(&[client("governo")], None).await;

    let articles = store.articles();
    assert_eq!(articles.len(), 1);
    let article = &articles[0];
    assert_eq!(article.client_slug, "acme");
    assert_eq!(article.topic, "Política");
    assert_eq!(article.summary, "Governo anuncia vacina nova");
    assert!(article.published_at.is_some());
    assert_eq!(article.source, "Portal Teste");
}
