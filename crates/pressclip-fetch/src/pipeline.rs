//! Per-client fetch orchestration.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pressclip_core::clients::ClientConfig;
use pressclip_core::query::{build_query, parse_keywords};
use pressclip_store::ArticleStore;

use crate::cache::ResultCache;
use crate::error::FetchError;
use crate::expand::QueryExpander;
use crate::sources::{self, AdapterCtx};
use crate::types::{ClientReport, FetchConfig, FetchWindow, RunReport, SeenSet};

/// Drives one fetch run: clients in sequence, sources per client in
/// parallel, everything funneled through one store and one seen-set per
/// client.
pub struct Pipeline {
    cfg: FetchConfig,
    store: Arc<dyn ArticleStore>,
    expander: Option<Arc<dyn QueryExpander>>,
    cache: ResultCache,
    http: reqwest::Client,
}

impl Pipeline {
    /// Build a pipeline with its shared HTTP client and result cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        cfg: FetchConfig,
        store: Arc<dyn ArticleStore>,
        expander: Option<Arc<dyn QueryExpander>>,
    ) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(cfg.user_agent.clone())
            .build()?;
        let cache = ResultCache::new(cfg.cache_dir.clone());

        Ok(Self {
            cfg,
            store,
            expander,
            cache,
            http,
        })
    }

    /// Run the pipeline over the client catalog. With a `filter`, only
    /// the client whose slug matches is fetched.
    pub async fn run(&self, clients: &[ClientConfig], filter: Option<&str>) -> RunReport {
        let mut report = RunReport::default();

        for client in clients {
            let slug = client.slug();
            if let Some(wanted) = filter {
                if slug != wanted {
                    continue;
                }
            }

            match self.run_client(client, &slug).await {
                Some(client_report) => {
                    report.total += client_report.total;
                    report.clients.push(client_report);
                }
                None => {
                    tracing::warn!(client = slug.as_str(), "no usable keywords, skipping");
                }
            }
        }

        report
    }

    /// Fetch all sources for one client. Returns `None` when the
    /// keyword profile is empty after normalization.
    async fn run_client(&self, client: &ClientConfig, slug: &str) -> Option<ClientReport> {
        let keywords = parse_keywords(&client.keywords);
        if keywords.is_empty() {
            return None;
        }

        let until = Utc::now();
        // Config bounds the lookback, but an unrepresentable value still
        // degrades to an unbounded window instead of panicking.
        let since = i64::try_from(self.cfg.lookback_days)
            .ok()
            .and_then(chrono::Duration::try_days)
            .and_then(|d| until.checked_sub_signed(d))
            .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);
        let window = FetchWindow { since, until };

        let primary = build_query(&keywords, client.operators.as_ref());
        let queries = self.expanded_queries(slug, &keywords, primary).await;

        tracing::info!(
            client = slug,
            keywords = keywords.len(),
            queries = queries.len(),
            "fetching client"
        );

        let seen = SeenSet::new();
        let ctx = AdapterCtx {
            client_slug: slug,
            keywords: &keywords,
            queries: &queries,
            domains: client.domains.as_deref(),
            window,
            seen: &seen,
            store: self.store.as_ref(),
            http: &self.http,
            cache: &self.cache,
            cfg: &self.cfg,
        };

        let sources = sources::collect_sources(&ctx).await;

        let mut total = 0;
        for source in &sources {
            match &source.outcome {
                Ok(count) => {
                    total += count;
                    tracing::info!(client = slug, source = source.source, created = count, "source done");
                }
                Err(e) => {
                    tracing::warn!(client = slug, source = source.source, error = %e, "source failed");
                }
            }
        }

        Some(ClientReport {
            client: client.name.clone(),
            sources,
            total,
        })
    }

    /// The primary query plus any cached or freshly generated
    /// expansions. Expansion problems degrade to the primary query
    /// alone.
    async fn expanded_queries(
        &self,
        slug: &str,
        keywords: &[String],
        primary: String,
    ) -> Vec<String> {
        let Some(expander) = self.expander.as_ref() else {
            return vec![primary];
        };

        let cache_key = keywords.join(",");
        let expansions: Vec<String> = match self.cache.get(&cache_key, "query_expansion") {
            Some(cached) => cached,
            None => match expander
                .expand(keywords, self.cfg.max_expanded_queries)
                .await
            {
                Ok(expansions) => {
                    self.cache.set(
                        &cache_key,
                        "query_expansion",
                        &expansions,
                        self.cfg.expand_cache_ttl,
                    );
                    expansions
                }
                Err(e) => {
                    tracing::warn!(client = slug, error = %e, "query expansion failed");
                    Vec::new()
                }
            },
        };

        let mut queries = vec![primary];
        for expansion in expansions {
            if !queries.contains(&expansion) {
                queries.push(expansion);
            }
        }
        queries
    }
}
