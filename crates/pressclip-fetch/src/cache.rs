//! Filesystem-backed result cache with lazy TTL expiry.
//!
//! Keys are a stable SHA-256 of `"{query}:{source}"`, so entries survive
//! process restarts and never depend on hash-map iteration order.
//! Expiry is binary and checked at read time: a stale entry is removed
//! and reported as a miss. There is no background sweeper. IO or parse
//! problems degrade to a miss: the cache only ever saves work, it
//! never fails the pipeline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    stored_at: DateTime<Utc>,
    ttl_secs: u64,
    value: serde_json::Value,
}

/// Durable, time-boxed key/value store shared process-wide.
#[derive(Debug, Clone)]
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    /// Create a cache rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to create cache dir");
        }
        Self { dir }
    }

    fn entry_path(&self, query: &str, source: &str) -> PathBuf {
        let digest = Sha256::digest(format!("{query}:{source}").as_bytes());
        self.dir.join(format!("{digest:x}"))
    }

    /// Look up a cached value. Stale entries are removed and reported
    /// as absent.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, query: &str, source: &str) -> Option<T> {
        self.get_at(query, source, Utc::now())
    }

    /// Store a value with the given TTL.
    pub fn set<T: Serialize>(&self, query: &str, source: &str, value: &T, ttl: Duration) {
        self.set_at(query, source, value, ttl, Utc::now());
    }

    fn get_at<T: DeserializeOwned>(
        &self,
        query: &str,
        source: &str,
        now: DateTime<Utc>,
    ) -> Option<T> {
        let path = self.entry_path(query, source);
        let raw = std::fs::read_to_string(&path).ok()?;
        let entry: Entry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "unreadable cache entry");
                remove_entry(&path);
                return None;
            }
        };

        let age = now.signed_duration_since(entry.stored_at);
        let expired = age.num_seconds() < 0
            || u64::try_from(age.num_seconds()).is_ok_and(|secs| secs > entry.ttl_secs);
        if expired {
            remove_entry(&path);
            return None;
        }

        serde_json::from_value(entry.value).ok()
    }

    fn set_at<T: Serialize>(
        &self,
        query: &str,
        source: &str,
        value: &T,
        ttl: Duration,
        now: DateTime<Utc>,
    ) {
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        let entry = Entry {
            stored_at: now,
            ttl_secs: ttl.as_secs(),
            value,
        };
        let path = self.entry_path(query, source);
        match serde_json::to_string(&entry) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::debug!(path = %path.display(), error = %e, "cache write failed");
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "cache entry serialization failed");
            }
        }
    }
}

fn remove_entry(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::debug!(path = %path.display(), error = %e, "cache entry removal failed");
    }
}
