//! Curated RSS/Atom feed adapter.
//!
//! Walks the configured feed list with a general feed parser, keeps
//! entries whose title matches a client keyword, and enforces the
//! lookback window strictly: undated entries and entries at or before
//! the window start are dropped. One broken feed is logged and skipped.

use pressclip_store::SaveOutcome;

use crate::error::FetchError;
use crate::persist::save_candidate;
use crate::types::Candidate;

use super::{matches_any_keyword, AdapterCtx};

pub(super) async fn fetch_curated_feeds(ctx: &AdapterCtx<'_>) -> Result<usize, FetchError> {
    let mut created = 0;

    for feed_url in &ctx.cfg.curated_feeds {
        match fetch_one_feed(ctx, feed_url).await {
            Ok(count) => created += count,
            Err(e) => {
                tracing::warn!(
                    client = ctx.client_slug,
                    feed = feed_url.as_str(),
                    error = %e,
                    "curated feed fetch failed"
                );
            }
        }
    }

    Ok(created)
}

async fn fetch_one_feed(ctx: &AdapterCtx<'_>, feed_url: &str) -> Result<usize, FetchError> {
    let response = ctx.http.get(feed_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            url: feed_url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.bytes().await?;
    let feed = feed_rs::parser::parse(body.as_ref())?;

    let feed_title = feed
        .title
        .map(|t| t.content)
        .unwrap_or_else(|| feed_url.to_string());

    let mut created = 0;
    for entry in feed.entries {
        let Some(title) = entry.title.map(|t| t.content) else {
            continue;
        };
        if !matches_any_keyword(&title, ctx.keywords) {
            continue;
        }
        // Undated entries cannot be placed in the window, so they are
        // dropped rather than stored with a guessed timestamp.
        let Some(published) = entry.published.or(entry.updated) else {
            continue;
        };
        if published <= ctx.window.since {
            continue;
        }
        let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
            continue;
        };
        if !ctx.seen.insert(&link) {
            continue;
        }

        let candidate = Candidate {
            title,
            url: link,
            raw_date: Some(published.to_rfc3339()),
            source: feed_title.clone(),
        };
        if save_candidate(ctx.store, ctx.client_slug, candidate).await? == SaveOutcome::Created {
            created += 1;
        }
    }

    Ok(created)
}
