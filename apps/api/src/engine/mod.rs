//! Recommendation engine — the matching core behind the HTTP surface.
//!
//! Control flow: keyword extraction → primary job source (secondary on an
//! empty result) → profile building → TF-IDF ranking (randomized fallback)
//! → result cache → caller. Stats aggregation runs independently over a
//! separately fetched batch.
//!
//! Every public method here is infallible by design: upstream failures
//! surface as empty result sets and ranking failures as degraded (fallback)
//! scores, never as errors. Callers distinguish the paths via `RankMethod`.

pub mod cache;
pub mod keywords;
pub mod profile;
pub mod ranker;
pub mod stats;

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::engine::cache::ResultCache;
use crate::engine::ranker::{RankMethod, RankResult};
use crate::jobsource::{JobQuery, JobSource};
use crate::models::job::{CandidateProfile, JobPosting, RankedPosting};
use crate::models::stats::JobStats;

/// Floor on how many postings one upstream fetch asks for, so the cache can
/// serve a few pages from a single batch.
const MIN_FETCH_LIMIT: usize = 30;
/// Batch size used for market statistics.
const STATS_FETCH_LIMIT: usize = 100;
/// At most this many query words become search keywords.
const MAX_QUERY_KEYWORDS: usize = 5;

/// A ranked result set plus its quality indicators.
#[derive(Debug, Clone)]
pub struct RecommendationSet {
    pub items: Vec<RankedPosting>,
    /// Which ranking path produced the items. Fallback means the scores
    /// carry no relevance signal.
    pub method: RankMethod,
    /// Approximate: true when the last upstream fetch returned at least as
    /// many items as were requested. A hint, not a guarantee.
    pub has_more: bool,
}

impl RecommendationSet {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            method: RankMethod::TfIdf,
            has_more: false,
        }
    }
}

/// The job-matching engine. Holds two injected job sources (the secondary is
/// consulted only when the primary returns nothing) and the result cache.
pub struct RecommendationEngine {
    primary: Arc<dyn JobSource>,
    secondary: Arc<dyn JobSource>,
    cache: Mutex<ResultCache>,
}

impl RecommendationEngine {
    pub fn new(primary: Arc<dyn JobSource>, secondary: Arc<dyn JobSource>) -> Self {
        Self {
            primary,
            secondary,
            cache: Mutex::new(ResultCache::new()),
        }
    }

    /// Ranks postings for a candidate profile, serving from the cache when a
    /// key is supplied and the caller did not force a refresh.
    pub async fn get_recommendations(
        &self,
        profile: &CandidateProfile,
        location: Option<&str>,
        count: usize,
        cache_key: Option<&str>,
        force_refresh: bool,
        page: u32,
    ) -> RecommendationSet {
        info!(
            "engine: get_recommendations count={count} page={page} refresh={force_refresh} key={cache_key:?}"
        );

        if let Some(key) = cache_key {
            if !force_refresh {
                if let Some(set) = self.cached(key, count) {
                    info!("engine: serving cached result for key {key}");
                    return set;
                }
            }
        }

        let keywords = keywords::extract_keywords(profile);
        debug!("engine: search keywords: {keywords:?}");

        let fetch_limit = (count + 10).max(MIN_FETCH_LIMIT);
        let available = self
            .fetch_with_fallback(keywords, location, fetch_limit, page)
            .await;
        if available.is_empty() {
            warn!("engine: no available jobs from any source");
            return RecommendationSet::empty();
        }

        let profile_text = profile::build_profile(profile);
        debug!("engine: built profile text ({} chars)", profile_text.len());

        let RankResult { items, method } = ranker::rank(&profile_text, &available, count);
        let has_more = available.len() >= fetch_limit;

        if let Some(key) = cache_key {
            self.lock_cache()
                .put(key, items.clone(), method, page, has_more);
            debug!("engine: cache updated for key {key}");
        }

        RecommendationSet {
            items,
            method,
            has_more,
        }
    }

    /// Free-text search: the raw query doubles as the matching profile. The
    /// full ranked batch is returned; callers paginate. `fetch_more` forces
    /// a fresh upstream fetch even when a cached batch exists.
    pub async fn search(
        &self,
        query: &str,
        location: Option<&str>,
        cache_key: Option<&str>,
        page: u32,
        size: usize,
        fetch_more: bool,
    ) -> RecommendationSet {
        info!("engine: search query='{query}' page={page} size={size} fetch_more={fetch_more}");

        if let Some(key) = cache_key {
            if !fetch_more {
                if let Some(set) = self.cached(key, usize::MAX) {
                    info!("engine: serving cached search result for key {key}");
                    return set;
                }
            }
        }

        let keywords: Vec<String> = query
            .split_whitespace()
            .take(MAX_QUERY_KEYWORDS)
            .map(str::to_string)
            .collect();

        // Enough for the requested page and the one after it, so page
        // navigation does not refetch.
        let fetch_limit = (size * page as usize + size).max(MIN_FETCH_LIMIT);
        let available = self
            .fetch_with_fallback(keywords, location, fetch_limit, 1)
            .await;
        if available.is_empty() {
            warn!("engine: search found no jobs for query '{query}'");
            return RecommendationSet::empty();
        }

        let n = available.len();
        let RankResult { items, method } = ranker::rank(query, &available, n);
        let has_more = available.len() >= fetch_limit;

        if let Some(key) = cache_key {
            self.lock_cache()
                .put(key, items.clone(), method, page, has_more);
        }

        RecommendationSet {
            items,
            method,
            has_more,
        }
    }

    /// Market statistics for the postings matching a candidate profile.
    /// Fetches a batch from the secondary source and aggregates it.
    pub async fn get_stats(&self, profile: &CandidateProfile) -> JobStats {
        let keywords = keywords::extract_keywords(profile);
        info!("engine: get_stats keywords={keywords:?}");

        let query = JobQuery {
            keywords,
            location: None,
            limit: STATS_FETCH_LIMIT,
            page: 1,
        };
        let postings = self.secondary.fetch(&query).await;
        stats::aggregate(&postings)
    }

    /// Removes one cached entry, or every entry when `key` is `None`.
    pub fn clear_cache(&self, key: Option<&str>) {
        self.lock_cache().clear(key);
    }

    #[cfg(test)]
    pub fn cached_keys(&self) -> usize {
        self.lock_cache().len()
    }

    /// Primary source first; the secondary is a same-contract adapter used
    /// only when the primary comes back empty.
    async fn fetch_with_fallback(
        &self,
        keywords: Vec<String>,
        location: Option<&str>,
        limit: usize,
        page: u32,
    ) -> Vec<JobPosting> {
        let query = JobQuery {
            keywords,
            location: location.map(str::to_string),
            limit,
            page,
        };

        let postings = self.primary.fetch(&query).await;
        if !postings.is_empty() {
            debug!("engine: primary source returned {} postings", postings.len());
            return postings;
        }

        info!("engine: primary source empty, trying secondary");
        let postings = self.secondary.fetch(&query).await;
        debug!(
            "engine: secondary source returned {} postings",
            postings.len()
        );
        postings
    }

    fn cached(&self, key: &str, count: usize) -> Option<RecommendationSet> {
        let cache = self.lock_cache();
        let entry = cache.get(key)?;
        let items = entry.ranked.iter().take(count).cloned().collect();
        Some(RecommendationSet {
            items,
            method: entry.method,
            has_more: entry.has_more,
        })
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ResultCache> {
        // Lock is never held across an .await; poisoning would mean a panic
        // inside plain map operations.
        self.cache.lock().expect("result cache mutex poisoned")
    }
}
