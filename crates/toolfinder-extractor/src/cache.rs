//! Freshness cache for discovered batches

use crate::types::ExtractionTier;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use toolfinder_domain::ToolRecord;

#[derive(Debug, Clone)]
struct CachedBatch {
    records: Vec<ToolRecord>,
    tier: ExtractionTier,
    stored_at: Instant,
}

/// LRU cache of extracted batches, keyed by prompt, that forgets entries
/// once they are older than the freshness window.
pub(crate) struct BatchCache {
    ttl: Duration,
    entries: Mutex<LruCache<String, CachedBatch>>,
}

impl BatchCache {
    pub(crate) fn new(ttl: Duration, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            ttl,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Fresh batch for `key`, if any; stale entries are evicted on lookup
    pub(crate) fn get(&self, key: &str) -> Option<(Vec<ToolRecord>, ExtractionTier)> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let stale = match entries.get(key) {
            Some(batch) if batch.stored_at.elapsed() < self.ttl => {
                return Some((batch.records.clone(), batch.tier));
            }
            Some(_) => true,
            None => false,
        };

        if stale {
            entries.pop(key);
        }
        None
    }

    pub(crate) fn insert(&self, key: String, records: Vec<ToolRecord>, tier: ExtractionTier) {
        let batch = CachedBatch {
            records,
            tier,
            stored_at: Instant::now(),
        };
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .put(key, batch);
    }

    pub(crate) fn clear(&self) {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
