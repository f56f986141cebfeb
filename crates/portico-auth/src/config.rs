// Runtime configuration loaded from environment variables.
// Decision: one base URL plus an API key addresses the hosted auth service;
// everything else has a local-development default

use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60); // 30 days

/// Application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the hosted auth service, e.g. `https://xyz.example.co/auth/v1`
    pub auth_url: String,
    /// API key sent as the `apikey` header on every service call
    pub api_key: String,
    /// Optional origin override used when building the OAuth callback URL.
    /// When unset, the browser's own origin is used.
    pub site_url: Option<String>,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Lifetime of the refresh-token cookie
    pub session_max_age: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://localhost:9999/auth/v1".to_string(),
            api_key: String::new(),
            site_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            session_max_age: DEFAULT_SESSION_MAX_AGE,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let auth_url =
            std::env::var("AUTH_URL").context("AUTH_URL environment variable required")?;
        let api_key =
            std::env::var("AUTH_API_KEY").context("AUTH_API_KEY environment variable required")?;

        let site_url = std::env::var("SITE_URL").ok().filter(|s| !s.is_empty());

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let session_max_age = std::env::var("SESSION_MAX_AGE")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(|mins: u64| Duration::from_secs(mins * 60))
            .unwrap_or(DEFAULT_SESSION_MAX_AGE);

        Ok(Self {
            auth_url: normalize_url(&auth_url),
            api_key,
            site_url: site_url.as_deref().map(normalize_url),
            bind_addr,
            session_max_age,
        })
    }
}

/// Strip trailing slashes so paths can be appended with plain `format!`
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.session_max_age, Duration::from_secs(30 * 24 * 60 * 60));
        assert!(config.site_url.is_none());
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("https://x.example.co/auth/v1/"), "https://x.example.co/auth/v1");
        assert_eq!(normalize_url("https://x.example.co"), "https://x.example.co");
    }
}
