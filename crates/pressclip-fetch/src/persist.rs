//! Enrichment and the persistence gate.
//!
//! Every candidate passes through here exactly once: field length caps,
//! lenient date parsing, title summarization and topic classification,
//! then the store's conditional insert.

use pressclip_core::dates::parse_lenient;
use pressclip_store::{ArticleStore, NewArticle, SaveOutcome};

use crate::classify::classify;
use crate::error::FetchError;
use crate::summarize::summarize;
use crate::types::Candidate;

const MAX_TITLE_CHARS: usize = 300;
const MAX_SOURCE_CHARS: usize = 200;
const SUMMARY_SENTENCES: usize = 3;

/// Enrich a candidate and hand it to the store. Unparseable dates
/// become `None` rather than discarding the article.
///
/// # Errors
///
/// Returns an error when the store insert fails. Duplicate articles are
/// a normal outcome, not an error.
pub async fn save_candidate(
    store: &dyn ArticleStore,
    client_slug: &str,
    candidate: Candidate,
) -> Result<SaveOutcome, FetchError> {
    let title = truncate_chars(&candidate.title, MAX_TITLE_CHARS);
    let published_at = candidate.raw_date.as_deref().and_then(parse_lenient);
    let summary = summarize(&title, SUMMARY_SENTENCES);
    let topic = classify(&title).to_string();

    let article = NewArticle {
        client_slug: client_slug.to_string(),
        title,
        url: candidate.url,
        published_at,
        source: truncate_chars(&candidate.source, MAX_SOURCE_CHARS),
        summary,
        topic,
    };

    let outcome = store.create_if_absent(article).await?;
    if outcome == SaveOutcome::Duplicate {
        tracing::debug!(client = client_slug, "duplicate article skipped");
    }
    Ok(outcome)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
