use std::sync::Arc;

use crate::config::Config;
use crate::engine::RecommendationEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The matching core. Holds the injected job sources and the result cache.
    pub engine: Arc<RecommendationEngine>,
    pub config: Config,
}
