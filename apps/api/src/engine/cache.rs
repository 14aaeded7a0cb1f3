//! Result cache — holds the most recently computed ranked result set and
//! pagination progress per logical query key.
//!
//! No TTL and no eviction: entries live until explicitly cleared or the
//! process restarts. Staleness is caller-managed via `force_refresh`. The
//! struct itself is single-threaded; the engine wraps it in a `Mutex`
//! because axum shares state across tasks.

use std::collections::HashMap;

use crate::engine::ranker::RankMethod;
use crate::models::job::RankedPosting;

/// One cached result set. The ranked sequence is replaced wholesale on every
/// write, never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub ranked: Vec<RankedPosting>,
    /// Which ranking path produced the sequence, so cache hits keep the
    /// result-quality indicator truthful.
    pub method: RankMethod,
    pub last_page_served: u32,
    /// Heuristic: the last fetch returned at least as many items as were
    /// requested. A best-effort hint, not a guarantee.
    pub has_more: bool,
}

/// Key → entry map for ranked result sets. Keys are caller-supplied opaque
/// strings, typically derived from candidate identity + location or from a
/// search query + location.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Replaces any prior entry for `key`.
    pub fn put(
        &mut self,
        key: &str,
        ranked: Vec<RankedPosting>,
        method: RankMethod,
        page: u32,
        has_more: bool,
    ) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                ranked,
                method,
                last_page_served: page,
                has_more,
            },
        );
    }

    /// Removes one entry, or everything when `key` is `None`. Idempotent.
    pub fn clear(&mut self, key: Option<&str>) {
        match key {
            Some(k) => {
                if self.entries.remove(k).is_some() {
                    tracing::info!("cache: cleared entry for key {k}");
                } else {
                    tracing::debug!("cache: no entry to clear for key {k}");
                }
            }
            None => {
                self.entries.clear();
                tracing::info!("cache: cleared all entries");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobPosting;

    fn ranked(id: &str, score: f64) -> RankedPosting {
        RankedPosting {
            posting: JobPosting {
                id: id.to_string(),
                title: String::new(),
                company: String::new(),
                location: String::new(),
                description: String::new(),
                url: String::new(),
                date_posted: String::new(),
                salary: None,
                content: String::new(),
            },
            match_score: score,
        }
    }

    #[test]
    fn test_round_trip_preserves_sequence() {
        let mut cache = ResultCache::new();
        cache.put(
            "k",
            vec![ranked("a", 90.0), ranked("b", 80.0)],
            RankMethod::TfIdf,
            1,
            true,
        );

        let entry = cache.get("k").unwrap();
        assert_eq!(entry.ranked.len(), 2);
        assert_eq!(entry.ranked[0].posting.id, "a");
        assert_eq!(entry.ranked[1].posting.id, "b");
        assert_eq!(entry.last_page_served, 1);
        assert!(entry.has_more);
    }

    #[test]
    fn test_put_replaces_wholesale() {
        let mut cache = ResultCache::new();
        cache.put("k", vec![ranked("a", 90.0)], RankMethod::TfIdf, 1, true);
        cache.put("k", vec![ranked("b", 70.0)], RankMethod::Fallback, 2, false);

        let entry = cache.get("k").unwrap();
        assert_eq!(entry.ranked.len(), 1);
        assert_eq!(entry.ranked[0].posting.id, "b");
        assert_eq!(entry.method, RankMethod::Fallback);
        assert_eq!(entry.last_page_served, 2);
        assert!(!entry.has_more);
    }

    #[test]
    fn test_miss_returns_none() {
        let cache = ResultCache::new();
        assert!(cache.get("missing").is_none());
    }

    #[test]
    fn test_clear_single_key() {
        let mut cache = ResultCache::new();
        cache.put("a", vec![], RankMethod::TfIdf, 1, false);
        cache.put("b", vec![], RankMethod::TfIdf, 1, false);
        cache.clear(Some("a"));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_clear_all_is_idempotent() {
        let mut cache = ResultCache::new();
        cache.put("a", vec![], RankMethod::TfIdf, 1, false);
        cache.clear(None);
        assert!(cache.is_empty());
        cache.clear(None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_missing_key_is_noop() {
        let mut cache = ResultCache::new();
        cache.put("a", vec![], RankMethod::TfIdf, 1, false);
        cache.clear(Some("missing"));
        assert_eq!(cache.len(), 1);
    }
}
