//! Ranker — scores postings against a candidate profile using TF-IDF and
//! cosine similarity, degrading to a randomized ranking when vector-space
//! scoring is infeasible.
//!
//! The ranking path never fails: every degenerate input routes to either an
//! empty result or the fallback ranker. Callers learn which path ran via
//! `RankMethod` instead of an error.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::job::{JobPosting, RankedPosting};

/// Which ranking path produced a result set. Surfaced to callers as a
/// result-quality indicator: fallback scores carry no relevance signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMethod {
    TfIdf,
    Fallback,
}

/// A ranked result set plus the path that produced it.
#[derive(Debug, Clone)]
pub struct RankResult {
    pub items: Vec<RankedPosting>,
    pub method: RankMethod,
}

/// Random-score band used by the fallback ranker.
const FALLBACK_SCORE_MIN: f64 = 50.0;
const FALLBACK_SCORE_MAX: f64 = 70.0;

/// Ranks `postings` against `profile_text`, returning the top `n` in
/// descending score order (stable on ties).
///
/// Postings without usable text are silently excluded. An empty profile or
/// an empty vocabulary after stopword removal routes to the fallback ranker
/// rather than failing.
pub fn rank(profile_text: &str, postings: &[JobPosting], n: usize) -> RankResult {
    let valid: Vec<(&JobPosting, String)> = postings
        .iter()
        .map(|p| (p, p.match_text()))
        .filter(|(_, text)| !text.trim().is_empty())
        .collect();

    if valid.is_empty() {
        debug!("ranker: no postings with usable content");
        return RankResult {
            items: Vec::new(),
            method: RankMethod::TfIdf,
        };
    }

    if profile_text.trim().is_empty() {
        warn!("ranker: empty profile, using fallback ranking");
        return fallback_rank(&valid, n);
    }

    match tfidf_similarities(profile_text, &valid) {
        Some(similarities) => {
            let mut items: Vec<RankedPosting> = valid
                .iter()
                .zip(similarities)
                .map(|((posting, _), sim)| RankedPosting {
                    posting: (*posting).clone(),
                    match_score: to_score(sim),
                })
                .collect();
            sort_descending(&mut items);
            items.truncate(n);
            RankResult {
                items,
                method: RankMethod::TfIdf,
            }
        }
        None => {
            warn!("ranker: vectorization infeasible, using fallback ranking");
            fallback_rank(&valid, n)
        }
    }
}

/// Assigns each posting a uniformly random score in a fixed band. Guarantees
/// the caller always receives some ordering when relevance scoring cannot run.
fn fallback_rank(valid: &[(&JobPosting, String)], n: usize) -> RankResult {
    let mut rng = rand::rng();
    let mut items: Vec<RankedPosting> = valid
        .iter()
        .map(|(posting, _)| RankedPosting {
            posting: (*posting).clone(),
            match_score: round1(rng.random_range(FALLBACK_SCORE_MIN..FALLBACK_SCORE_MAX)),
        })
        .collect();
    sort_descending(&mut items);
    items.truncate(n);
    RankResult {
        items,
        method: RankMethod::Fallback,
    }
}

/// Cosine similarity between the profile and each posting, over a TF-IDF
/// representation of {posting texts} ∪ {profile}.
///
/// Returns `None` when the corpus yields an empty vocabulary (all texts
/// stopword-only or too short to tokenize).
fn tfidf_similarities(profile_text: &str, valid: &[(&JobPosting, String)]) -> Option<Vec<f64>> {
    let mut docs: Vec<Vec<String>> = valid.iter().map(|(_, text)| tokenize(text)).collect();
    docs.push(tokenize(profile_text));

    let n_docs = docs.len();

    // Document frequency per term.
    let mut df: HashMap<&str, usize> = HashMap::new();
    for doc in &docs {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *df.entry(term).or_insert(0) += 1;
        }
    }
    if df.is_empty() {
        return None;
    }

    // Smoothed idf: ln((1 + n) / (1 + df)) + 1.
    let idf: HashMap<&str, f64> = df
        .iter()
        .map(|(&term, &count)| {
            let value = ((1.0 + n_docs as f64) / (1.0 + count as f64)).ln() + 1.0;
            (term, value)
        })
        .collect();

    let vectors: Vec<HashMap<&str, f64>> = docs
        .iter()
        .map(|doc| tfidf_vector(doc, &idf))
        .collect();

    let profile_vector = vectors.last().expect("corpus always contains the profile");
    let similarities = vectors[..n_docs - 1]
        .iter()
        .map(|v| {
            let sim = dot(profile_vector, v);
            if sim.is_nan() {
                0.0
            } else {
                sim
            }
        })
        .collect();
    Some(similarities)
}

/// L2-normalized TF-IDF vector for one document.
fn tfidf_vector<'a>(doc: &'a [String], idf: &HashMap<&str, f64>) -> HashMap<&'a str, f64> {
    let mut tf: HashMap<&str, f64> = HashMap::new();
    for term in doc {
        *tf.entry(term.as_str()).or_insert(0.0) += 1.0;
    }
    let mut vector: HashMap<&str, f64> = tf
        .into_iter()
        .map(|(term, count)| (term, count * idf.get(term).copied().unwrap_or(0.0)))
        .collect();

    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
    vector
}

fn dot(a: &HashMap<&str, f64>, b: &HashMap<&str, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum()
}

/// Lowercases, splits on non-alphanumeric boundaries, drops single-character
/// tokens and English stopwords.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2 && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Converts a cosine similarity (expected in [0, 1]) to a percentage score
/// rounded to one decimal, capped at 100.0.
fn to_score(similarity: f64) -> f64 {
    round1((similarity * 100.0).min(100.0)).max(0.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Stable descending sort — ties keep original fetch order.
fn sort_descending(items: &mut [RankedPosting]) {
    items.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Common English stopwords, mirroring the usual text-vectorizer defaults.
static STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him",
    "his", "how", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more",
    "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
    "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(id: &str, content: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: String::new(),
            company: String::new(),
            location: String::new(),
            description: String::new(),
            url: String::new(),
            date_posted: String::new(),
            salary: None,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_relevant_posting_ranks_first_with_nonzero_score() {
        let postings = vec![
            posting("chef", "Chef job cooking meals"),
            posting("python", "Python Engineer building backend services"),
        ];
        let result = rank("python python python engineer", &postings, 1);
        assert_eq!(result.method, RankMethod::TfIdf);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].posting.id, "python");
        assert!(result.items[0].match_score > 0.0);
    }

    #[test]
    fn test_returns_min_of_n_and_usable_postings() {
        let postings = vec![
            posting("a", "rust engineer"),
            posting("b", "rust developer"),
            posting("c", "rust programmer"),
        ];
        assert_eq!(rank("rust", &postings, 2).items.len(), 2);
        assert_eq!(rank("rust", &postings, 10).items.len(), 3);
        assert_eq!(rank("rust", &postings, 0).items.len(), 0);
    }

    #[test]
    fn test_scores_within_bounds_and_sorted_descending() {
        let postings = vec![
            posting("a", "python backend engineer"),
            posting("b", "frontend react developer"),
            posting("c", "python data scientist"),
        ];
        let result = rank("python engineer", &postings, 3);
        for item in &result.items {
            assert!(item.match_score >= 0.0 && item.match_score <= 100.0);
            assert!(item.match_score.is_finite());
        }
        for pair in result.items.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_identical_text_scores_one_hundred() {
        let postings = vec![posting("a", "senior rust engineer")];
        let result = rank("senior rust engineer", &postings, 1);
        assert_eq!(result.items[0].match_score, 100.0);
    }

    #[test]
    fn test_empty_profile_uses_fallback_band() {
        let postings = vec![posting("a", "some job"), posting("b", "other job")];
        let result = rank("", &postings, 2);
        assert_eq!(result.method, RankMethod::Fallback);
        assert_eq!(result.items.len(), 2);
        for item in &result.items {
            assert!(item.match_score >= FALLBACK_SCORE_MIN);
            assert!(item.match_score <= FALLBACK_SCORE_MAX);
        }
    }

    #[test]
    fn test_stopword_only_corpus_uses_fallback() {
        let postings = vec![posting("a", "the and of"), posting("b", "is it to")];
        let result = rank("for with from", &postings, 2);
        assert_eq!(result.method, RankMethod::Fallback);
        assert_eq!(result.items.len(), 2);
    }

    #[test]
    fn test_no_usable_postings_returns_empty() {
        let postings = vec![posting("a", ""), posting("b", "   ")];
        let result = rank("python engineer", &postings, 5);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_unusable_postings_excluded_not_errored() {
        let postings = vec![
            posting("a", ""),
            posting("b", "python engineer role"),
            posting("c", "  "),
        ];
        let result = rank("python", &postings, 10);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].posting.id, "b");
    }

    #[test]
    fn test_fallback_sorted_descending() {
        let postings: Vec<JobPosting> =
            (0..20).map(|i| posting(&format!("p{i}"), "job")).collect();
        let result = rank("", &postings, 20);
        for pair in result.items.windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
    }

    #[test]
    fn test_unrelated_profile_scores_zero() {
        let postings = vec![posting("a", "pastry chef bakery")];
        let result = rank("kernel driver firmware", &postings, 1);
        assert_eq!(result.method, RankMethod::TfIdf);
        assert_eq!(result.items[0].match_score, 0.0);
    }

    #[test]
    fn test_tokenize_drops_stopwords_and_short_tokens() {
        let tokens = tokenize("The Rust engineer is at a startup");
        assert_eq!(tokens, vec!["rust", "engineer", "startup"]);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(66.666), 66.7);
    }
}
