//! PostgreSQL store backend.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::{ArticleStore, NewArticle, SaveOutcome, StoreError};

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// Path relative to crates/pressclip-store/Cargo.toml; resolves to
// <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

/// Connect a pool with the given configuration.
///
/// # Errors
///
/// Returns [`StoreError::Sqlx`] if the connection cannot be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply pending migrations.
///
/// # Errors
///
/// Returns [`StoreError::Sqlx`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    MIGRATOR.run(pool).await.map_err(sqlx::Error::from)?;
    Ok(())
}

/// `ArticleStore` backed by the `articles` table.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ArticleStore for PgStore {
    /// `INSERT … ON CONFLICT (client_slug, url) DO NOTHING`. Zero rows
    /// affected means another insert (this run or an earlier one) won the
    /// race, reported as [`SaveOutcome::Duplicate`].
    async fn create_if_absent(&self, article: NewArticle) -> Result<SaveOutcome, StoreError> {
        let result = sqlx::query(
            "INSERT INTO articles \
                 (client_slug, title, url, published_at, source, summary, topic) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (client_slug, url) DO NOTHING",
        )
        .bind(&article.client_slug)
        .bind(&article.title)
        .bind(&article.url)
        .bind(article.published_at)
        .bind(&article.source)
        .bind(&article.summary)
        .bind(&article.topic)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(SaveOutcome::Duplicate)
        } else {
            Ok(SaveOutcome::Created)
        }
    }
}
