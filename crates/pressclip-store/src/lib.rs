//! Article persistence: the create-if-absent store contract.
//!
//! The pipeline only ever asks the store one question: "create this
//! article unless (client, url) already exists". Duplicate suppression
//! across runs and across concurrent adapters belongs to the store's
//! uniqueness constraint, not to application-level locking.

mod memory;
mod postgres;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::{connect_pool, run_migrations, PgStore, PoolConfig};

/// An article ready for persistence, already enriched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub client_slug: String,
    pub title: String,
    pub url: String,
    /// `None` when the source date string could not be parsed.
    pub published_at: Option<DateTime<Utc>>,
    pub source: String,
    pub summary: String,
    pub topic: String,
}

/// Result of a `create_if_absent` attempt. `Duplicate` is an expected,
/// non-error outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Duplicate,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Store contract consumed by the fetch pipeline.
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Insert the article unless one with the same (client_slug, url)
    /// already exists. Exactly one of several concurrent attempts for the
    /// same pair wins; the rest observe [`SaveOutcome::Duplicate`].
    async fn create_if_absent(&self, article: NewArticle) -> Result<SaveOutcome, StoreError>;
}
