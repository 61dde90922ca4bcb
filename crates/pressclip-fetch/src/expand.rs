//! Optional query expansion against an external HTTP service.
//!
//! The expander is a collaborator behind a trait so the pipeline can run
//! with or without one, and so tests can substitute a stub. Expansion
//! failures never fail a fetch: the caller falls back to the primary
//! query alone.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Produces alternate search queries for a client's keyword set.
#[async_trait]
pub trait QueryExpander: Send + Sync {
    async fn expand(
        &self,
        keywords: &[String],
        max_queries: usize,
    ) -> Result<Vec<String>, FetchError>;
}

#[derive(Debug, Serialize)]
struct ExpandRequest<'a> {
    keywords: &'a [String],
    max_queries: usize,
}

#[derive(Debug, Deserialize)]
struct ExpandResponse {
    #[serde(default)]
    queries: Vec<String>,
}

/// Client for a JSON-over-HTTP expansion service.
#[derive(Debug, Clone)]
pub struct HttpExpander {
    client: reqwest::Client,
    url: String,
}

impl HttpExpander {
    /// Build an expander for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/expand", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl QueryExpander for HttpExpander {
    async fn expand(
        &self,
        keywords: &[String],
        max_queries: usize,
    ) -> Result<Vec<String>, FetchError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ExpandRequest {
                keywords,
                max_queries,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body: ExpandResponse = response.json().await?;
        let mut queries = body.queries;
        queries.truncate(max_queries);
        Ok(queries)
    }
}
