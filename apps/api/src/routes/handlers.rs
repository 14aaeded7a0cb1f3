//! HTTP handlers — a thin layer over the recommendation engine. Parsing and
//! pagination happen here; all matching decisions live in `engine`.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::ranker::RankMethod;
use crate::errors::AppError;
use crate::models::job::{CandidateProfile, RankedPosting};
use crate::models::stats::JobStats;
use crate::routes::pagination::{paginate, PageParams, PageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    /// Comma-separated lists, as the caller's persistence layer stores them.
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    pub location: Option<String>,
    #[serde(default)]
    pub refresh: bool,
    pub page: Option<u32>,
    pub size: Option<usize>,
    /// Opaque caching key. Derived from the profile when absent.
    pub cache_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub ranking: RankMethod,
    /// Best-effort hint that another upstream page likely exists.
    pub approximate_has_more: bool,
    pub recommendations: PageResponse<RankedPosting>,
}

/// GET /api/v1/recommendations
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let profile = CandidateProfile {
        skills: split_list(&params.skills),
        experience: split_list(&params.experience),
        education: split_list(&params.education),
    };
    let location = params
        .location
        .clone()
        .or_else(|| Some(state.config.default_job_location.clone()));
    let paging = PageParams::new(
        params.page,
        params
            .size
            .or(Some(state.config.default_recommendations_count)),
    );

    let cache_key = params
        .cache_key
        .clone()
        .unwrap_or_else(|| profile_cache_key(&profile, location.as_deref()));

    info!(
        "recommendations request: page={} size={} refresh={}",
        paging.page, paging.size, params.refresh
    );

    // Fetch enough for the current page and the next one; the pagination
    // envelope slices the requested window out of the ranked batch.
    let count = paging.size * paging.page as usize + paging.size;
    let set = state
        .engine
        .get_recommendations(
            &profile,
            location.as_deref(),
            count,
            Some(&cache_key),
            params.refresh,
            paging.page,
        )
        .await;

    Ok(Json(RecommendationsResponse {
        ranking: set.method,
        approximate_has_more: set.has_more,
        recommendations: paginate(&set.items, paging),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    pub location: Option<String>,
    pub page: Option<u32>,
    pub size: Option<usize>,
    #[serde(default)]
    pub load_more: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub ranking: RankMethod,
    pub approximate_has_more: bool,
    pub jobs: PageResponse<RankedPosting>,
}

/// GET /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(AppError::Validation(
            "query must not be empty".to_string(),
        ));
    }

    let paging = PageParams::new(params.page, params.size);
    let cache_key = format!(
        "search_{query}_{}",
        params.location.as_deref().unwrap_or("default")
    );

    let set = state
        .engine
        .search(
            query,
            params.location.as_deref(),
            Some(&cache_key),
            paging.page,
            paging.size,
            params.load_more,
        )
        .await;

    Ok(Json(SearchResponse {
        query: query.to_string(),
        ranking: set.method,
        approximate_has_more: set.has_more,
        jobs: paginate(&set.items, paging),
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
}

/// GET /api/v1/stats
pub async fn handle_get_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<JobStats>, AppError> {
    let profile = CandidateProfile {
        skills: split_list(&params.skills),
        experience: split_list(&params.experience),
        education: split_list(&params.education),
    };
    let stats = state.engine.get_stats(&profile).await;
    Ok(Json(stats))
}

#[derive(Debug, Deserialize)]
pub struct ClearCacheQuery {
    pub key: Option<String>,
}

/// DELETE /api/v1/cache
pub async fn handle_clear_cache(
    State(state): State<AppState>,
    Query(params): Query<ClearCacheQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.engine.clear_cache(params.key.as_deref());
    let message = match params.key {
        Some(key) => format!("Cache cleared for key '{key}'"),
        None => "Cache cleared".to_string(),
    };
    Ok(Json(serde_json::json!({ "message": message })))
}

/// Splits a comma-separated query value into trimmed, non-empty items.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Stable caching key for a profile+location pair when the caller did not
/// supply one.
fn profile_cache_key(profile: &CandidateProfile, location: Option<&str>) -> String {
    format!(
        "profile_{}_{}",
        profile.skills.join("+").to_lowercase(),
        location.unwrap_or("default")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_filters() {
        assert_eq!(
            split_list("Python,  SQL ,,  "),
            vec!["Python".to_string(), "SQL".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_profile_cache_key_is_stable() {
        let profile = CandidateProfile {
            skills: vec!["Rust".to_string(), "Go".to_string()],
            experience: vec![],
            education: vec![],
        };
        assert_eq!(
            profile_cache_key(&profile, Some("Berlin")),
            "profile_rust+go_Berlin"
        );
        assert_eq!(
            profile_cache_key(&profile, None),
            "profile_rust+go_default"
        );
    }
}
