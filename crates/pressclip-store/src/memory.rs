//! In-memory store backend, used by tests and local experimentation.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::{ArticleStore, NewArticle, SaveOutcome, StoreError};

/// `ArticleStore` backed by a mutex-guarded vector. Mirrors the database
/// uniqueness semantics on (client_slug, url).
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    keys: HashSet<(String, String)>,
    articles: Vec<NewArticle>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything stored so far, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned.
    #[must_use]
    pub fn articles(&self) -> Vec<NewArticle> {
        self.inner.lock().expect("store mutex poisoned").articles.clone()
    }

    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").articles.len()
    }

    /// # Panics
    ///
    /// Panics if the inner mutex is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ArticleStore for MemoryStore {
    async fn create_if_absent(&self, article: NewArticle) -> Result<SaveOutcome, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let key = (article.client_slug.clone(), article.url.clone());
        if !inner.keys.insert(key) {
            return Ok(SaveOutcome::Duplicate);
        }
        inner.articles.push(article);
        Ok(SaveOutcome::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(slug: &str, url: &str) -> NewArticle {
        NewArticle {
            client_slug: slug.to_string(),
            title: "T".to_string(),
            url: url.to_string(),
            published_at: None,
            source: "src".to_string(),
            summary: "T".to_string(),
            topic: "Sem classificação".to_string(),
        }
    }

    #[tokio::test]
    async fn second_insert_of_same_pair_is_duplicate() {
        let store = MemoryStore::new();
        let a = article("acme", "http://x");
        assert_eq!(
            store.create_if_absent(a.clone()).await.unwrap(),
            SaveOutcome::Created
        );
        assert_eq!(
            store.create_if_absent(a).await.unwrap(),
            SaveOutcome::Duplicate
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn same_url_different_clients_both_stored() {
        let store = MemoryStore::new();
        store
            .create_if_absent(article("acme", "http://x"))
            .await
            .unwrap();
        store
            .create_if_absent(article("other", "http://x"))
            .await
            .unwrap();
        assert_eq!(store.len(), 2);
    }
}
