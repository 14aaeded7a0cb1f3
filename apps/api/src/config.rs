use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub jooble_api_key: String,
    pub default_job_location: String,
    pub default_recommendations_count: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            jooble_api_key: require_env("JOOBLE_API_KEY")?,
            default_job_location: std::env::var("DEFAULT_JOB_LOCATION")
                .unwrap_or_else(|_| "Remote".to_string()),
            default_recommendations_count: std::env::var("DEFAULT_RECOMMENDATIONS_COUNT")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<usize>()
                .context("DEFAULT_RECOMMENDATIONS_COUNT must be a positive integer")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
