use anyhow::{Context, Result};

/// Grams per nugget, used for the total-weight statistic.
/// Kept as configuration so later revisions can adjust it without a code change.
const DEFAULT_NUGGET_WEIGHT_GRAMS: u32 = 17;

/// Connection credentials for the hosted backend. When absent, the service
/// runs in demo mode against a fixed in-memory dataset.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Option<BackendConfig>,
    pub port: u16,
    pub rust_log: String,
    pub nugget_weight_grams: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend = match (optional_env("SUPABASE_URL"), optional_env("SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(BackendConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            }),
            _ => None,
        };

        Ok(Config {
            backend,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            nugget_weight_grams: std::env::var("NUGGET_WEIGHT_GRAMS")
                .unwrap_or_else(|_| DEFAULT_NUGGET_WEIGHT_GRAMS.to_string())
                .parse::<u32>()
                .context("NUGGET_WEIGHT_GRAMS must be a positive integer")?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
