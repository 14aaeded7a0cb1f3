//! Jooble adapter — fetches postings from the Jooble search API and
//! normalizes its payload into `JobPosting`s.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::jobsource::{JobQuery, JobSource};
use crate::models::job::JobPosting;

const JOOBLE_API_URL: &str = "https://jooble.org/api/";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Placeholder defaults for fields the upstream omitted.
const UNKNOWN_TITLE: &str = "Unknown Position";
const UNKNOWN_COMPANY: &str = "Unknown Company";
const UNKNOWN_LOCATION: &str = "Unknown Location";
const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Serialize)]
struct JoobleRequest {
    keywords: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(rename = "pageSize")]
    page_size: usize,
    page: u32,
}

/// HTTP client for the Jooble search API.
#[derive(Clone)]
pub struct JoobleClient {
    client: Client,
    api_key: String,
}

impl JoobleClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl JobSource for JoobleClient {
    async fn fetch(&self, query: &JobQuery) -> Vec<JobPosting> {
        if self.api_key.is_empty() {
            warn!("jooble: API key not configured, cannot fetch jobs");
            return Vec::new();
        }

        let body = JoobleRequest {
            keywords: query.keywords.join(" "),
            location: query.location.clone(),
            page_size: query.limit.max(1),
            page: query.page.max(1),
        };
        debug!(
            "jooble: fetching keywords='{}' location={:?} page_size={} page={}",
            body.keywords, body.location, body.page_size, body.page
        );

        let response = match self
            .client
            .post(format!("{JOOBLE_API_URL}{}", self.api_key))
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("jooble: request failed: {e}");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            warn!("jooble: non-success status {}", response.status());
            return Vec::new();
        }

        let payload: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("jooble: invalid JSON payload: {e}");
                return Vec::new();
            }
        };

        let postings = parse_jooble_payload(&payload);
        info!("jooble: processed {} postings", postings.len());
        postings
    }
}

/// Normalizes a raw Jooble payload. Tolerates a missing or malformed `jobs`
/// key and skips any item that is not a well-formed object; the remainder of
/// the batch is still processed.
pub fn parse_jooble_payload(payload: &Value) -> Vec<JobPosting> {
    let jobs = match payload.get("jobs").and_then(Value::as_array) {
        Some(list) => list,
        None => {
            warn!("jooble: 'jobs' key missing or not a list");
            return Vec::new();
        }
    };

    jobs.iter()
        .filter_map(|item| {
            if !item.is_object() {
                warn!("jooble: skipping non-object job item");
                return None;
            }
            Some(parse_job_item(item))
        })
        .collect()
}

fn parse_job_item(item: &Value) -> JobPosting {
    let title = str_field(item, "title", UNKNOWN_TITLE);
    let company = str_field(item, "company", UNKNOWN_COMPANY);
    let description = str_field(item, "snippet", NO_DESCRIPTION);

    // `id` may arrive as a JSON number.
    let id = match item.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    let content = format!("{title} {description} {company}").to_lowercase();
    let salary = item
        .get("salary")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    JobPosting {
        id,
        title,
        company,
        location: str_field(item, "location", UNKNOWN_LOCATION),
        description,
        url: str_field(item, "link", ""),
        date_posted: str_field(item, "updated", ""),
        salary,
        content,
    }
}

fn str_field(item: &Value, key: &str, default: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_well_formed_payload() {
        let payload = json!({
            "jobs": [{
                "id": "123",
                "title": "Rust Engineer",
                "company": "Acme",
                "location": "Berlin",
                "snippet": "Build backend services",
                "link": "https://example.test/123",
                "updated": "2024-05-01",
                "salary": "60000"
            }]
        });
        let postings = parse_jooble_payload(&payload);
        assert_eq!(postings.len(), 1);
        let p = &postings[0];
        assert_eq!(p.id, "123");
        assert_eq!(p.title, "Rust Engineer");
        assert_eq!(p.description, "Build backend services");
        assert_eq!(p.url, "https://example.test/123");
        assert_eq!(p.salary.as_deref(), Some("60000"));
        assert_eq!(p.content, "rust engineer build backend services acme");
    }

    #[test]
    fn test_missing_fields_get_placeholder_defaults() {
        let payload = json!({ "jobs": [{}] });
        let postings = parse_jooble_payload(&payload);
        assert_eq!(postings.len(), 1);
        let p = &postings[0];
        assert_eq!(p.title, UNKNOWN_TITLE);
        assert_eq!(p.company, UNKNOWN_COMPANY);
        assert_eq!(p.location, UNKNOWN_LOCATION);
        assert_eq!(p.description, NO_DESCRIPTION);
        assert!(p.salary.is_none());
        assert!(p.url.is_empty());
    }

    #[test]
    fn test_non_object_items_skipped() {
        let payload = json!({
            "jobs": ["garbage", 42, {"title": "Valid Job"}]
        });
        let postings = parse_jooble_payload(&payload);
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Valid Job");
    }

    #[test]
    fn test_jobs_key_missing_or_wrong_type() {
        assert!(parse_jooble_payload(&json!({})).is_empty());
        assert!(parse_jooble_payload(&json!({ "jobs": "oops" })).is_empty());
        assert!(parse_jooble_payload(&json!(null)).is_empty());
    }

    #[test]
    fn test_numeric_id_stringified() {
        let payload = json!({ "jobs": [{"id": 987654}] });
        let postings = parse_jooble_payload(&payload);
        assert_eq!(postings[0].id, "987654");
    }

    #[tokio::test]
    async fn test_empty_api_key_returns_empty() {
        let client = JoobleClient::new(String::new());
        let query = JobQuery {
            keywords: vec!["rust".to_string()],
            location: None,
            limit: 10,
            page: 1,
        };
        assert!(client.fetch(&query).await.is_empty());
    }
}
