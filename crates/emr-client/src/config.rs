//! Client Configuration
//!
//! Base URL and timeout for the EMR REST API.

use std::time::Duration;

/// Path suffix every base URL must end with
pub const API_VERSION_SUFFIX: &str = "/api/v1";

/// Used when no base URL is configured at build time
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Applied uniformly to every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Read `EMR_API_BASE_URL` baked in at compile time (the browser has no
    /// process environment), falling back to the local development server.
    pub fn from_env() -> Self {
        Self::new(option_env!("EMR_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join an endpoint path (leading slash optional) onto the base URL
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Strip trailing slashes and make sure the URL ends with `/api/v1`
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let base = if trimmed.is_empty() { DEFAULT_BASE_URL } else { trimmed };
    if base.ends_with(API_VERSION_SUFFIX) {
        base.to_string()
    } else {
        format!("{}{}", base, API_VERSION_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_appends_suffix() {
        assert_eq!(normalize_base_url("https://emr.example.org"), "https://emr.example.org/api/v1");
        assert_eq!(normalize_base_url("https://emr.example.org/"), "https://emr.example.org/api/v1");
    }

    #[test]
    fn test_normalize_keeps_existing_suffix() {
        assert_eq!(normalize_base_url("http://localhost:8080/api/v1"), "http://localhost:8080/api/v1");
        assert_eq!(normalize_base_url("http://localhost:8080/api/v1///"), "http://localhost:8080/api/v1");
    }

    #[test]
    fn test_normalize_empty_uses_default() {
        assert_eq!(normalize_base_url("  "), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_url_for() {
        let config = ClientConfig::new("http://api.local");
        assert_eq!(config.url_for("/pasien"), "http://api.local/api/v1/pasien");
        assert_eq!(config.url_for("pasien/7"), "http://api.local/api/v1/pasien/7");
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
    }
}
