use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Nothing is required: every value has a default or is optional.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-fills the form and is used when a submission leaves the URL blank.
    pub backend_url: Option<String>,
    pub backend_timeout: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: None,
            backend_timeout: Duration::from_secs(DEFAULT_BACKEND_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch the process env.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            backend_url: lookup("BACKEND_URL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            backend_timeout: match lookup("BACKEND_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(
                    raw.trim()
                        .parse::<u64>()
                        .context("BACKEND_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.backend_timeout,
            },
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => defaults.max_upload_bytes,
            },
            port: match lookup("PORT") {
                Some(raw) => raw
                    .trim()
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}
