// crates/geoinsight-core/src/config.rs

use crate::error::{GeoInsightError, Result};
use crate::validate::MIN_QUERY_LEN;
use std::time::Duration;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "GEOINSIGHT_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Timing and length knobs for [`SearchController`](crate::SearchController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before suggestions are fetched.
    pub debounce: Duration,
    /// Queries shorter than this never reach the suggestion source.
    pub min_query_len: usize,
    /// Delay between losing focus and hiding the suggestion list, so a click
    /// on a suggestion still lands.
    pub blur_grace: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_query_len: MIN_QUERY_LEN,
            blur_grace: Duration::from_millis(200),
        }
    }
}

/// Connection settings for the GeoInsight REST backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads [`API_URL_ENV`], falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if url.trim().is_empty() => Err(GeoInsightError::Config(format!(
                "{API_URL_ENV} is set but empty"
            ))),
            Ok(url) => Ok(Self::new(url.trim())),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(GeoInsightError::Config(format!("{API_URL_ENV}: {e}"))),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
