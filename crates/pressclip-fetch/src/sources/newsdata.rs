//! NewsData.io search API adapter.
//!
//! The only paid source: responses are cached per query, the provider
//! caps how far back its archive reaches on this plan, and the adapter
//! quietly sits out runs without a configured credential.

use chrono::Duration;
use serde::Deserialize;

use crate::error::FetchError;
use crate::persist::save_candidate;
use crate::types::{Candidate, FetchWindow};

use super::AdapterCtx;

/// Hard stop on pagination per query.
const MAX_PAGES: usize = 5;

#[derive(Debug, Deserialize)]
struct NewsdataResponse {
    #[serde(default)]
    results: Vec<NewsdataItem>,
    #[serde(rename = "nextPage")]
    next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsdataItem {
    title: Option<String>,
    link: Option<String>,
    url: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
    source_name: Option<String>,
}

/// Client for the NewsData.io `latest` endpoint. The base URL is
/// explicit so tests can point it at a mock server.
pub struct NewsdataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl NewsdataClient {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search recent articles for `query`, following pagination tokens
    /// up to a fixed page cap.
    ///
    /// The requested window is clamped to the provider's archive limit:
    /// `from_date` never precedes `until - cap_days` regardless of the
    /// configured lookback.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-2xx statuses, and undecodable
    /// response bodies.
    pub async fn latest(
        &self,
        query: &str,
        language: &str,
        domains: Option<&str>,
        window: &FetchWindow,
        cap_days: u64,
    ) -> Result<Vec<Candidate>, FetchError> {
        let since = clamp_since(window, cap_days);
        let from_date = since.format("%Y-%m-%d").to_string();
        let to_date = window.until.format("%Y-%m-%d").to_string();
        let url = format!("{}/api/1/latest", self.base_url);

        let mut candidates = Vec::new();
        let mut page: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut params = vec![
                ("apikey", self.api_key.as_str()),
                ("q", query),
                ("language", language),
                ("from_date", from_date.as_str()),
                ("to_date", to_date.as_str()),
            ];
            if let Some(domain) = domains {
                params.push(("domain", domain));
            }
            if let Some(token) = page.as_deref() {
                params.push(("page", token));
            }

            let response = self.http.get(&url).query(&params).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::UnexpectedStatus {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }

            let body: NewsdataResponse = response.json().await?;
            for item in body.results {
                let Some(title) = item.title else { continue };
                let Some(link) = item.link.or(item.url) else {
                    continue;
                };
                let source = item
                    .source_id
                    .or(item.source_name)
                    .unwrap_or_else(|| "newsdata".to_string());
                candidates.push(Candidate {
                    title,
                    url: link,
                    raw_date: item.pub_date,
                    source,
                });
            }

            match body.next_page {
                Some(token) => page = Some(token),
                None => break,
            }
        }

        Ok(candidates)
    }
}

/// The later of the requested window start and the provider's archive
/// floor. A cap too large to represent leaves the window start as is.
fn clamp_since(window: &FetchWindow, cap_days: u64) -> chrono::DateTime<chrono::Utc> {
    let floor = i64::try_from(cap_days)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|d| window.until.checked_sub_signed(d))
        .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
    window.since.max(floor)
}

pub(super) async fn fetch_newsdata(ctx: &AdapterCtx<'_>) -> Result<usize, FetchError> {
    let Some(api_key) = ctx.cfg.newsdata_api_key.as_deref() else {
        tracing::debug!(client = ctx.client_slug, "no NewsData API key, skipping");
        return Ok(0);
    };

    let client = NewsdataClient::new(ctx.http.clone(), &ctx.cfg.newsdata_base_url, api_key);
    let mut created = 0;

    for query in ctx.queries {
        let candidates: Vec<Candidate> = match ctx.cache.get(query, "newsdata") {
            Some(cached) => cached,
            None => {
                let fetched = client
                    .latest(
                        query,
                        &ctx.cfg.language,
                        ctx.domains,
                        &ctx.window,
                        ctx.cfg.newsdata_cap_days,
                    )
                    .await?;
                ctx.cache
                    .set(query, "newsdata", &fetched, ctx.cfg.search_cache_ttl);
                fetched
            }
        };

        for candidate in candidates {
            if !ctx.seen.insert(&candidate.url) {
                continue;
            }
            if save_candidate(ctx.store, ctx.client_slug, candidate).await?
                == pressclip_store::SaveOutcome::Created
            {
                created += 1;
            }
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn window_within_cap_is_unchanged() {
        let window = FetchWindow {
            since: Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap(),
            until: Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap(),
        };
        assert_eq!(clamp_since(&window, 30), window.since);
    }

    #[test]
    fn wide_window_is_clamped_to_archive_floor() {
        let window = FetchWindow {
            since: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            until: Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap(),
        };
        let clamped = clamp_since(&window, 30);
        assert_eq!(
            clamped,
            Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn unrepresentable_cap_does_not_panic() {
        let window = FetchWindow {
            since: Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(),
            until: Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap(),
        };
        assert_eq!(clamp_since(&window, u64::MAX), window.since);
    }
}
