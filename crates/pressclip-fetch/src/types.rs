//! Pipeline data types: candidates, reports, the seen-set, and the
//! fetch configuration.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::sources::{self, ScrapeSite};

/// A transient candidate article produced by one adapter. Serializable
/// so adapter results can live in the result cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub title: String,
    pub url: String,
    /// Source-dependent date string, parsed leniently at save time.
    pub raw_date: Option<String>,
    pub source: String,
}

/// The lookback window of one client fetch, ending "now".
#[derive(Debug, Clone, Copy)]
pub struct FetchWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

/// Per-run, per-client set of URLs already handed to the persistence
/// gate. Shared mutably by all four adapters; the store's uniqueness
/// constraint remains the authority across runs.
#[derive(Debug, Default)]
pub struct SeenSet {
    urls: Mutex<HashSet<String>>,
}

impl SeenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a URL. Returns `true` if it was not seen before.
    ///
    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned.
    pub fn insert(&self, url: &str) -> bool {
        self.urls
            .lock()
            .expect("seen-set mutex poisoned")
            .insert(url.to_string())
    }

    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.lock().expect("seen-set mutex poisoned").len()
    }

    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tagged outcome of one adapter: a count of newly created articles or
/// the reason it failed. Collected centrally by the orchestrator.
#[derive(Debug)]
pub struct SourceReport {
    pub source: &'static str,
    pub outcome: Result<usize, FetchError>,
}

/// Per-client aggregation across the four adapters.
#[derive(Debug)]
pub struct ClientReport {
    pub client: String,
    pub sources: Vec<SourceReport>,
    pub total: usize,
}

/// Whole-run aggregation.
#[derive(Debug, Default)]
pub struct RunReport {
    pub clients: Vec<ClientReport>,
    pub total: usize,
}

/// Pipeline configuration. Base URLs and target lists are explicit so
/// tests can point every adapter at a mock server.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub newsdata_api_key: Option<String>,
    pub newsdata_base_url: String,
    pub google_base_url: String,
    pub language: String,
    pub curated_feeds: Vec<String>,
    pub scrape_sites: Vec<ScrapeSite>,
    pub lookback_days: u64,
    pub newsdata_cap_days: u64,
    pub search_cache_ttl: Duration,
    pub expand_cache_ttl: Duration,
    pub max_expanded_queries: usize,
    pub request_timeout_secs: u64,
    pub scrape_timeout_secs: u64,
    pub scrape_delay_ms: u64,
    pub user_agent: String,
    pub cache_dir: PathBuf,
}

impl FetchConfig {
    /// Derive the pipeline configuration from the application config,
    /// with the built-in feed catalog and scrape site descriptors.
    #[must_use]
    pub fn from_app(cfg: &pressclip_core::AppConfig) -> Self {
        Self {
            newsdata_api_key: cfg.newsdata_api_key.clone(),
            newsdata_base_url: cfg.newsdata_base_url.clone(),
            google_base_url: sources::GOOGLE_NEWS_BASE.to_string(),
            language: cfg.language.clone(),
            curated_feeds: sources::catalog_feeds(),
            scrape_sites: sources::default_scrape_sites(),
            lookback_days: cfg.lookback_days,
            newsdata_cap_days: cfg.newsdata_cap_days,
            search_cache_ttl: Duration::from_secs(cfg.search_cache_ttl_hours * 3600),
            expand_cache_ttl: Duration::from_secs(cfg.expand_cache_ttl_hours * 3600),
            max_expanded_queries: cfg.max_expanded_queries,
            request_timeout_secs: cfg.request_timeout_secs,
            scrape_timeout_secs: cfg.scrape_timeout_secs,
            scrape_delay_ms: cfg.scrape_delay_ms,
            user_agent: cfg.user_agent.clone(),
            cache_dir: cfg.cache_dir.clone(),
        }
    }
}
