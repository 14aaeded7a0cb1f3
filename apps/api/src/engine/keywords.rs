//! Keyword extraction — derives a bounded set of search terms from a
//! candidate profile for querying upstream job sources.

use crate::models::job::CandidateProfile;

const MAX_KEYWORDS: usize = 5;
const MAX_TITLE_WORDS: usize = 3;
const MAX_SKILLS: usize = 3;

/// Extracts at most 5 deduplicated, order-preserving search keywords.
///
/// Tiering:
/// 1. First 3 words of the first non-empty experience entry (a job title),
///    then up to 3 trimmed non-empty skills.
/// 2. If skills and experience are both empty: the first word of each
///    non-empty education entry.
/// 3. If that is empty too: the literal `["entry", "level", "job"]`.
///
/// Infallible — always returns at least one keyword.
pub fn extract_keywords(profile: &CandidateProfile) -> Vec<String> {
    let clean_skills: Vec<String> = profile
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let job_titles: Vec<String> = profile
        .experience
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(|e| {
            e.split_whitespace()
                .take(MAX_TITLE_WORDS)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    if clean_skills.is_empty() && job_titles.is_empty() {
        return fallback_keywords(&profile.education);
    }

    let mut keywords: Vec<String> = Vec::new();
    keywords.extend(job_titles.into_iter().take(1));
    keywords.extend(clean_skills.into_iter().take(MAX_SKILLS));

    dedup_preserving_order(keywords)
        .into_iter()
        .take(MAX_KEYWORDS)
        .collect()
}

/// Education-derived keywords, or the literal entry-level fallback.
fn fallback_keywords(education: &[String]) -> Vec<String> {
    let from_education: Vec<String> = education
        .iter()
        .filter_map(|e| e.trim().split_whitespace().next())
        .map(str::to_string)
        .collect();

    if from_education.is_empty() {
        return vec![
            "entry".to_string(),
            "level".to_string(),
            "job".to_string(),
        ];
    }
    dedup_preserving_order(from_education)
        .into_iter()
        .take(MAX_KEYWORDS)
        .collect()
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(skills: &[&str], experience: &[&str], education: &[&str]) -> CandidateProfile {
        CandidateProfile {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: experience.iter().map(|s| s.to_string()).collect(),
            education: education.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_title_keyword_then_skills() {
        let p = profile(
            &["Python", "SQL", "Docker", "Kubernetes"],
            &["Senior Backend Engineer at Acme Corp"],
            &[],
        );
        let keywords = extract_keywords(&p);
        assert_eq!(
            keywords,
            vec!["Senior Backend Engineer", "Python", "SQL", "Docker"]
        );
    }

    #[test]
    fn test_at_most_five_keywords() {
        let p = profile(
            &["A", "B", "C", "D", "E", "F"],
            &["One Two Three Four", "Other Role"],
            &[],
        );
        let keywords = extract_keywords(&p);
        assert!(keywords.len() <= 5);
        assert_eq!(keywords[0], "One Two Three");
    }

    #[test]
    fn test_deduplicates_preserving_first_occurrence() {
        let p = profile(&["Rust", "Rust", "Go"], &["Rust"], &[]);
        let keywords = extract_keywords(&p);
        assert_eq!(keywords, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_blank_skills_are_skipped() {
        let p = profile(&["  ", "Python"], &[], &[]);
        assert_eq!(extract_keywords(&p), vec!["Python"]);
    }

    #[test]
    fn test_education_fallback_uses_first_words() {
        let p = profile(&[], &[], &["Computer Science BSc", "Mathematics Minor"]);
        assert_eq!(extract_keywords(&p), vec!["Computer", "Mathematics"]);
    }

    #[test]
    fn test_literal_fallback_when_everything_empty() {
        let p = profile(&[], &[], &[]);
        assert_eq!(extract_keywords(&p), vec!["entry", "level", "job"]);
    }

    #[test]
    fn test_literal_fallback_when_education_is_blank() {
        let p = profile(&[], &[], &["   "]);
        assert_eq!(extract_keywords(&p), vec!["entry", "level", "job"]);
    }
}
