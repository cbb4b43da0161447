//! Client configuration loaded from environment variables.

use std::time::Duration;

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a single workflow API instance.
#[derive(Debug, Clone)]
pub struct N8nConfig {
    /// Base URL without trailing slash, e.g. `http://localhost:5678`.
    pub api_url: String,
    /// Value sent in the `X-N8N-API-KEY` header.
    pub api_key: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl N8nConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `N8N_API_URL`              | yes      | --      |
    /// | `N8N_API_KEY`              | yes      | --      |
    /// | `N8N_REQUEST_TIMEOUT_SECS` | no       | `30`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from an arbitrary
    /// source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("N8N_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("N8N_API_URL"))?;

        let api_key = lookup("N8N_API_KEY")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("N8N_API_KEY"))?;

        let request_timeout_secs = match lookup("N8N_REQUEST_TIMEOUT_SECS") {
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "N8N_REQUEST_TIMEOUT_SECS",
                expected: "a whole number of seconds",
                value: raw.clone(),
            })?,
        };

        Ok(Self {
            api_url,
            api_key,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_unset() {
        let config = N8nConfig::from_lookup(lookup_from(&[
            ("N8N_API_URL", "http://localhost:5678/"),
            ("N8N_API_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:5678");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn missing_url_is_reported() {
        let err = N8nConfig::from_lookup(lookup_from(&[("N8N_API_KEY", "secret")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("N8N_API_URL")));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = N8nConfig::from_lookup(lookup_from(&[
            ("N8N_API_URL", "http://localhost:5678"),
            ("N8N_API_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("N8N_API_KEY")));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let err = N8nConfig::from_lookup(lookup_from(&[
            ("N8N_API_URL", "http://localhost:5678"),
            ("N8N_API_KEY", "secret"),
            ("N8N_REQUEST_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "N8N_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got \"soon\""
        );
    }
}
