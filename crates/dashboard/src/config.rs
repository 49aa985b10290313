//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WANDERHUB_API_URL` - Base URL of the travel backend REST API
//!
//! ## Optional
//! - `WANDERHUB_API_TOKEN` - Bearer token for backend calls
//! - `WANDERHUB_STATUS_CLEAR_SECS` - Transient status auto-dismiss delay (default: 4)
//! - `WANDERHUB_REQUEST_TIMEOUT_SECS` - Per-request HTTP timeout (default: 30)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_STATUS_CLEAR_SECS: u64 = 4;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dashboard application configuration.
#[derive(Clone)]
pub struct DashboardConfig {
    /// Base URL of the travel backend, normalized to end with a slash.
    pub api_url: Url,
    /// Bearer token for backend calls, if the deployment requires one.
    pub api_token: Option<SecretString>,
    /// How long a transient status message stays before auto-dismissing.
    pub status_clear: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("status_clear", &self.status_clear)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("WANDERHUB_API_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("WANDERHUB_API_URL".to_string()))?;
        let api_url = parse_base_url(&api_url)?;

        let api_token = lookup("WANDERHUB_API_TOKEN").map(SecretString::from);

        let status_clear = parse_secs_or_default(
            lookup("WANDERHUB_STATUS_CLEAR_SECS"),
            "WANDERHUB_STATUS_CLEAR_SECS",
            DEFAULT_STATUS_CLEAR_SECS,
        )?;
        let request_timeout = parse_secs_or_default(
            lookup("WANDERHUB_REQUEST_TIMEOUT_SECS"),
            "WANDERHUB_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Self {
            api_url,
            api_token,
            status_clear,
            request_timeout,
        })
    }

    /// Minimal configuration for unit tests.
    #[cfg(test)]
    pub(crate) fn for_tests(api_url: &str) -> Self {
        Self {
            api_url: Url::parse(api_url).expect("valid test URL"),
            api_token: None,
            status_clear: Duration::from_secs(DEFAULT_STATUS_CLEAR_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Parse and normalize the backend base URL.
///
/// A trailing slash is required for relative path joins to keep the base
/// path; it is appended if absent.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };

    Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("WANDERHUB_API_URL".to_string(), e.to_string()))
}

/// Parse a whole-seconds duration variable, falling back to a default.
fn parse_secs_or_default(
    value: Option<String>,
    var_name: &str,
    default_secs: u64,
) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(default_secs));
    };

    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_url() {
        let result = DashboardConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[(
            "WANDERHUB_API_URL",
            "https://api.wanderhub.travel",
        )]))
        .unwrap();

        assert_eq!(config.api_url.as_str(), "https://api.wanderhub.travel/");
        assert!(config.api_token.is_none());
        assert_eq!(config.status_clear, Duration::from_secs(4));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_preserved() {
        let config = DashboardConfig::from_lookup(lookup_from(&[(
            "WANDERHUB_API_URL",
            "https://api.wanderhub.travel/v1/",
        )]))
        .unwrap();
        assert_eq!(config.api_url.as_str(), "https://api.wanderhub.travel/v1/");
    }

    #[test]
    fn test_invalid_url() {
        let result = DashboardConfig::from_lookup(lookup_from(&[("WANDERHUB_API_URL", "not a url")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_overridden_durations() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            ("WANDERHUB_API_URL", "http://localhost:8000"),
            ("WANDERHUB_STATUS_CLEAR_SECS", "3"),
            ("WANDERHUB_REQUEST_TIMEOUT_SECS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.status_clear, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_duration() {
        let result = DashboardConfig::from_lookup(lookup_from(&[
            ("WANDERHUB_API_URL", "http://localhost:8000"),
            ("WANDERHUB_STATUS_CLEAR_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = DashboardConfig {
            api_url: Url::parse("http://localhost:8000/").unwrap(),
            api_token: Some(SecretString::from("wh_live_supersecret".to_string())),
            status_clear: Duration::from_secs(4),
            request_timeout: Duration::from_secs(30),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("wh_live_supersecret"));
    }
}
