//! Time-boxed in-memory result cache
//!
//! Shared by every audit tool so identical requests inside the TTL window
//! reuse one crawl. Keys are a normalized composite of tool name and inputs;
//! entries are immutable once written and expire lazily at read time; there
//! is no background sweep. Concurrent reads and writes go through a sharded
//! map with last-write-wins semantics, which is safe here because a given
//! key always maps to the same logical result.

use dashmap::DashMap;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::utils::constants::DEFAULT_CACHE_TTL_SECS;

struct CacheEntry {
    value: Value,
    inserted_at: Instant,
}

/// Process-wide audit result cache.
///
/// Constructed once at startup and handed to request handlers by reference;
/// lifecycle equals process lifetime, no explicit teardown.
pub struct ResultCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResultCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Build a cache key from a tool name and its inputs.
    ///
    /// Inputs are lowercased and trimmed and joined in argument order, so
    /// requests differing only by casing or stray whitespace collapse to the
    /// same slot.
    #[must_use]
    pub fn key(tool: &str, inputs: &[&str]) -> String {
        let mut key = String::from(tool);
        for input in inputs {
            key.push('|');
            key.push_str(&input.trim().to_lowercase());
        }
        key
    }

    /// Look up a cached value, treating expired entries as absent.
    ///
    /// An entry older than the TTL is deleted on this read.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.inserted_at.elapsed() <= self.ttl {
                    debug!(key, "Result cache hit");
                    return Some(entry.value.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            debug!(key, "Evicting expired cache entry");
            self.entries.remove(key);
        }
        None
    }

    /// Store a computed result.
    pub fn insert(&self, key: String, value: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_CACHE_TTL_SECS))
    }
}
