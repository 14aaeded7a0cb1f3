//! Aggregate market statistics over a batch of postings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Min/max/average of the salaries that could be parsed from a batch.
/// All zero when no salary string was parsable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// Market statistics computed from one fetched batch of postings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobStats {
    pub total_matching_jobs: usize,
    pub locations: HashMap<String, u32>,
    pub salary_range: SalaryRange,
    /// (skill, occurrence count), descending by count.
    pub top_skills: Vec<(String, u32)>,
    pub job_types: HashMap<String, u32>,
}
