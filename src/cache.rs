//! Dedup cache for annotated URLs
//!
//! Remembers the annotated form of each source URL, keyed by the URL with any
//! existing width parameter removed. A hit returns the stored string verbatim,
//! so a URL seen once keeps its first annotation for the cache's lifetime even
//! if the width would now resolve differently. Concurrent misses on one key
//! may each compute, but only the first result is stored and every caller
//! gets it back.
//!
//! Entries are never evicted; `clear()` empties the cache and an optional
//! entry limit stops new entries from being stored once reached.

use crate::annotate::strip_width_params;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache settings from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of memoized URLs; unbounded when absent.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Annotated URL cache, shared by reference across renders.
#[derive(Debug, Default)]
pub struct DedupCache {
    entries: RwLock<HashMap<String, String>>,
    max_entries: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache key for `url`: width parameters stripped, trailing `?`/`&` trimmed.
pub fn normalize_key(url: &str) -> String {
    strip_width_params(url)
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache that stops memoizing once `max_entries` URLs are stored.
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Self::default()
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        match config.max_entries {
            Some(limit) => Self::with_limit(limit),
            None => Self::new(),
        }
    }

    /// Stored annotation for `url`, or the result of `compute` (stored when
    /// there is room). `compute` runs without holding the lock; when another
    /// caller stored the key meanwhile, its value is returned instead.
    pub fn get_or_compute<F>(&self, url: &str, compute: F) -> String
    where
        F: FnOnce() -> String,
    {
        let key = normalize_key(url);
        if let Some(hit) = self.entries.read().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit.clone();
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = compute();

        let mut entries = self.entries.write();
        if let Some(stored) = entries.get(&key) {
            return stored.clone();
        }
        let full = self
            .max_entries
            .map(|limit| entries.len() >= limit)
            .unwrap_or(false);
        if full {
            return value;
        }
        entries.entry(key).or_insert(value).clone()
    }

    pub fn get(&self, url: &str) -> Option<String> {
        self.entries.read().get(&normalize_key(url)).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every entry and reset counters.
    pub fn clear(&self) {
        self.entries.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
