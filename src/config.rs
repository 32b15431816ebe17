//! Configuration module

use std::env;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_SAMPLE_LIMIT, DEFAULT_TIMEOUT_SECS, ENV_API_URL, ENV_SAMPLE_LIMIT,
    ENV_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prediction service origin, without trailing slash
    pub api_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Number of catalog samples shown by the console
    pub sample_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = lookup(ENV_TIMEOUT_SECS)
            .and_then(|t| t.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);

        let sample_limit = lookup(ENV_SAMPLE_LIMIT)
            .and_then(|n| n.trim().parse().ok())
            .unwrap_or(DEFAULT_SAMPLE_LIMIT);

        Self {
            api_url: normalize_origin(&api_url),
            timeout_secs,
            sample_limit,
        }
    }

    /// Configuration pointing at a specific origin, other values default
    pub fn with_api_url(api_url: impl AsRef<str>) -> Self {
        Self {
            api_url: normalize_origin(api_url.as_ref()),
            ..Default::default()
        }
    }
}

fn normalize_origin(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
