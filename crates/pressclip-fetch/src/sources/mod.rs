//! Source adapters: the paid search API, Google News RSS, the curated
//! feed catalog, and direct HTML scraping.
//!
//! All four run concurrently per client. A failing adapter reports its
//! error; it never takes the siblings down with it.

mod catalog;
mod feeds;
mod google_news;
mod newsdata;
mod scrape;

use std::future::Future;
use std::pin::Pin;

use futures::stream::{self, StreamExt};
use pressclip_core::normalize::normalize;
use pressclip_store::ArticleStore;

pub use newsdata::NewsdataClient;
pub use scrape::ScrapeSite;

use crate::cache::ResultCache;
use crate::types::{FetchConfig, FetchWindow, SeenSet, SourceReport};

pub(crate) const GOOGLE_NEWS_BASE: &str = "https://news.google.com";

/// Adapters in flight at once for a single client.
const ADAPTER_CONCURRENCY: usize = 4;

pub(crate) fn catalog_feeds() -> Vec<String> {
    catalog::all_feeds()
}

pub(crate) fn default_scrape_sites() -> Vec<ScrapeSite> {
    scrape::default_sites()
}

/// Everything one adapter invocation needs, borrowed from the pipeline.
pub(crate) struct AdapterCtx<'a> {
    pub client_slug: &'a str,
    pub keywords: &'a [String],
    /// Search queries for the API adapter: the primary query plus any
    /// expansions.
    pub queries: &'a [String],
    pub domains: Option<&'a str>,
    pub window: FetchWindow,
    pub seen: &'a SeenSet,
    pub store: &'a dyn ArticleStore,
    pub http: &'a reqwest::Client,
    pub cache: &'a ResultCache,
    pub cfg: &'a FetchConfig,
}

/// Run all four adapters for one client and collect their tagged
/// outcomes.
pub(crate) async fn collect_sources(ctx: &AdapterCtx<'_>) -> Vec<SourceReport> {
    let tasks: Vec<Pin<Box<dyn Future<Output = SourceReport> + Send + '_>>> = vec![
        Box::pin(async {
            SourceReport {
                source: "newsdata",
                outcome: newsdata::fetch_newsdata(ctx).await,
            }
        }),
        Box::pin(async {
            SourceReport {
                source: "google_rss",
                outcome: google_news::fetch_google_news(ctx).await,
            }
        }),
        Box::pin(async {
            SourceReport {
                source: "rss_feeds",
                outcome: feeds::fetch_curated_feeds(ctx).await,
            }
        }),
        Box::pin(async {
            SourceReport {
                source: "web_scrape",
                outcome: scrape::fetch_scrape(ctx).await,
            }
        }),
    ];

    stream::iter(tasks)
        .buffer_unordered(ADAPTER_CONCURRENCY)
        .collect()
        .await
}

/// Accent- and case-insensitive keyword/title match, used by the
/// adapters that have no server-side query (curated feeds, scraping).
/// Keywords are already normalized at parse time; the title is
/// normalized here so "Eleição" matches "eleicao".
pub(crate) fn matches_any_keyword(title: &str, keywords: &[String]) -> bool {
    let normalized = normalize(title);
    keywords.iter().any(|kw| normalized.contains(kw.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_ignores_case_and_accents() {
        let keywords = vec!["eleicao".to_string(), "prefeitura".to_string()];
        assert!(matches_any_keyword("Eleição marcada para outubro", &keywords));
        assert!(matches_any_keyword("PREFEITURA anuncia obras", &keywords));
        assert!(!matches_any_keyword("Campeonato estadual começa", &keywords));
    }
}
