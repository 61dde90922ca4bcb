use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub log_level: String,
    pub clients_path: PathBuf,
    /// NewsData API credential. Absent means the structured-API adapter
    /// is skipped silently.
    pub newsdata_api_key: Option<String>,
    pub newsdata_base_url: String,
    /// Optional query-expansion service endpoint. Absent degrades to the
    /// plain boolean query.
    pub expander_url: Option<String>,
    pub cache_dir: PathBuf,
    pub language: String,
    pub lookback_days: u64,
    /// Provider lookback cap for the structured API, in days.
    pub newsdata_cap_days: u64,
    pub search_cache_ttl_hours: u64,
    pub expand_cache_ttl_hours: u64,
    pub max_expanded_queries: usize,
    pub request_timeout_secs: u64,
    pub scrape_timeout_secs: u64,
    pub scrape_delay_ms: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("clients_path", &self.clients_path)
            .field(
                "newsdata_api_key",
                &self.newsdata_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("newsdata_base_url", &self.newsdata_base_url)
            .field("expander_url", &self.expander_url)
            .field("cache_dir", &self.cache_dir)
            .field("language", &self.language)
            .field("lookback_days", &self.lookback_days)
            .field("newsdata_cap_days", &self.newsdata_cap_days)
            .field("search_cache_ttl_hours", &self.search_cache_ttl_hours)
            .field("expand_cache_ttl_hours", &self.expand_cache_ttl_hours)
            .field("max_expanded_queries", &self.max_expanded_queries)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("scrape_timeout_secs", &self.scrape_timeout_secs)
            .field("scrape_delay_ms", &self.scrape_delay_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
