//! Stats aggregation — market statistics over one fetched batch of postings:
//! location counts, opportunistic salary range, top technical skills, and
//! employment-type counts.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::job::JobPosting;
use crate::models::stats::{JobStats, SalaryRange};

/// Fixed vocabulary of common technical skills counted in title+description.
const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "go",
    "c++",
    "c#",
    "sql",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "react",
    "angular",
    "node",
    "linux",
    "git",
    "machine learning",
    "data analysis",
];

/// Employment-type keyword groups. Only the first matching group counts for
/// a given posting — no double counting.
const JOB_TYPE_GROUPS: &[(&str, &[&str])] = &[
    ("Full-time", &["full time", "full-time"]),
    ("Part-time", &["part time", "part-time"]),
    ("Contract", &["contract", "contractor"]),
    ("Internship", &["intern", "internship"]),
    ("Remote", &["remote", "work from home"]),
];

fn salary_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d[\d,.]*)").expect("salary regex is valid"))
}

/// Computes aggregate stats for a batch. Empty batch → zeroed/empty stats.
pub fn aggregate(postings: &[JobPosting]) -> JobStats {
    let mut stats = JobStats {
        total_matching_jobs: postings.len(),
        ..JobStats::default()
    };
    if postings.is_empty() {
        return stats;
    }

    for posting in postings {
        if !posting.location.is_empty() {
            *stats.locations.entry(posting.location.clone()).or_insert(0) += 1;
        }
    }

    stats.salary_range = salary_range(postings);
    stats.top_skills = top_skills(postings);
    stats.job_types = job_types(postings);
    stats
}

/// Best-effort numeric extraction from free-text salary strings.
/// Unparsable values are skipped silently.
fn salary_range(postings: &[JobPosting]) -> SalaryRange {
    let salaries: Vec<f64> = postings
        .iter()
        .filter_map(|p| p.salary.as_deref())
        .filter_map(parse_salary)
        .collect();

    if salaries.is_empty() {
        return SalaryRange::default();
    }
    let min = salaries.iter().copied().fold(f64::INFINITY, f64::min);
    let max = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = (salaries.iter().sum::<f64>() / salaries.len() as f64).trunc();
    SalaryRange { min, max, avg }
}

fn parse_salary(text: &str) -> Option<f64> {
    let captured = salary_number_re().captures(text)?;
    captured.get(1)?.as_str().replace(',', "").parse().ok()
}

fn top_skills(postings: &[JobPosting]) -> Vec<(String, u32)> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for posting in postings {
        let text = format!("{} {}", posting.title, posting.description).to_lowercase();
        for skill in SKILL_VOCABULARY {
            if text.contains(skill) {
                *counts.entry(skill).or_insert(0) += 1;
            }
        }
    }
    let mut ranked: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(skill, count)| (skill.to_string(), count))
        .collect();
    // Descending by count, alphabetical on ties for a deterministic order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

fn job_types(postings: &[JobPosting]) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for posting in postings {
        let text = format!("{} {}", posting.title, posting.description).to_lowercase();
        for (label, keywords) in JOB_TYPE_GROUPS {
            if keywords.iter().any(|kw| text.contains(kw)) {
                *counts.entry(label.to_string()).or_insert(0) += 1;
                break;
            }
        }
    }
    counts
}
