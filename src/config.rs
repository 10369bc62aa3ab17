use std::time::Duration;

/// Backend connection settings, read from the environment with defaults
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API, without a trailing slash
    pub base_url: String,
    /// Bearer token for authenticated calls, if already signed in
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Read `LISTING_API_URL`, `LISTING_API_TOKEN` and
    /// `LISTING_API_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("LISTING_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000/api".to_string());
        let token = std::env::var("LISTING_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let timeout = std::env::var("LISTING_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_localhost() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
