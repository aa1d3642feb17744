//! Remote record-store implementation module.
//!
//! This module contains the HTTP client for the remote record-store API and
//! the repository implementation built on top of it. Everything here is
//! compiled only with the `remote-repo` feature.

pub mod client;
pub mod repository;

pub use client::RecordStoreClient;
pub use repository::RemoteRepository;

use std::env;

/// Connection settings for the remote record store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the record-store API, e.g. `https://store.example.com`
    pub base_url: String,
    /// Project identifier sent with every request
    pub project_id: String,
    /// API key used as a bearer token
    pub api_key: String,
    /// Per-request timeout in seconds
    pub timeout_sec: u64,
    /// Attempts for retryable failures (connect, timeout, 5xx)
    pub max_retries: u32,
    /// Delay between attempts, multiplied by the attempt number
    pub retry_delay_ms: u64,
}

impl RemoteConfig {
    /// Load connection settings from environment variables.
    ///
    /// Requires `RECORD_STORE_URL`, `RECORD_STORE_PROJECT_ID` and
    /// `RECORD_STORE_API_KEY`. Timeout and retry settings fall back to
    /// defaults when unset.
    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("RECORD_STORE_URL")
            .map_err(|_| "RECORD_STORE_URL is not set".to_string())?;
        let project_id = env::var("RECORD_STORE_PROJECT_ID")
            .map_err(|_| "RECORD_STORE_PROJECT_ID is not set".to_string())?;
        let api_key = env::var("RECORD_STORE_API_KEY")
            .map_err(|_| "RECORD_STORE_API_KEY is not set".to_string())?;

        Ok(Self {
            base_url,
            project_id,
            api_key,
            timeout_sec: env_or("RECORD_STORE_TIMEOUT_SEC", 30),
            max_retries: env_or("RECORD_STORE_MAX_RETRIES", 3),
            retry_delay_ms: env_or("RECORD_STORE_RETRY_DELAY_MS", 100),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
