//! Profile building — flattens structured candidate data into a single
//! weighted text blob for similarity scoring.

use crate::models::job::CandidateProfile;

/// How many times each skill is repeated in the profile text. Skills should
/// dominate the vector-space representation relative to free-text
/// experience/education lines.
const SKILL_WEIGHT: usize = 3;

/// Builds the space-joined profile string used by the ranker.
/// Empty input yields an empty string, not an error.
pub fn build_profile(profile: &CandidateProfile) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for skill in trimmed_nonempty(&profile.skills) {
        for _ in 0..SKILL_WEIGHT {
            parts.push(skill);
        }
    }
    parts.extend(trimmed_nonempty(&profile.experience));
    parts.extend(trimmed_nonempty(&profile.education));

    parts.join(" ")
}

fn trimmed_nonempty(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}
