//! Job source boundary — the contract every upstream job-listing provider
//! implements, plus the Jooble HTTP adapter.
//!
//! ARCHITECTURAL RULE: sources are best-effort and unreliable. A fetch
//! absorbs every upstream failure (timeout, non-2xx, malformed payload) and
//! returns an empty list — the engine decides what degraded service looks
//! like, never the transport.

pub mod jooble;

use async_trait::async_trait;

use crate::models::job::JobPosting;

/// A keyword/location/page query against an upstream source.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub keywords: Vec<String>,
    pub location: Option<String>,
    pub limit: usize,
    pub page: u32,
}

/// Upstream job-listing provider. Carried by the engine as
/// `Arc<dyn JobSource>` so tests can substitute in-memory sources.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetches postings for a query. Infallible by contract: any upstream
    /// problem surfaces as an empty list.
    async fn fetch(&self, query: &JobQuery) -> Vec<JobPosting>;
}
