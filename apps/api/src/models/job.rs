//! Job posting data model — the shape every job source normalizes into.

use serde::{Deserialize, Serialize};

/// A single job posting as fetched from an upstream source.
/// Immutable once constructed; lives only for the duration of a ranking
/// request plus cache retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    /// Posting date as supplied upstream — opaque string, not parsed.
    pub date_posted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    /// Lowercased `title description company`, the text used for matching.
    pub content: String,
}

impl JobPosting {
    /// Text used for similarity scoring. Falls back to reconstructing from
    /// title + description when `content` was not populated upstream.
    pub fn match_text(&self) -> String {
        if !self.content.trim().is_empty() {
            return self.content.clone();
        }
        format!("{} {}", self.title, self.description)
            .trim()
            .to_string()
    }
}

/// A posting plus its relevance score, produced by the ranker.
/// `match_score` is always finite and within `[0.0, 100.0]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedPosting {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub match_score: f64,
}

/// Candidate profile data, supplied by the caller per request.
/// Persistence of this data is an external concern — no validation here.
#[derive(Debug, Clone, Default)]
pub struct CandidateProfile {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
}
