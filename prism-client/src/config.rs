//! Client configuration
//!
//! Loaded from a TOML file, with `PRISM_CLIENT_URL` and
//! `PRISM_CLIENT_API_KEY` overriding the file values.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_URL: &str = "PRISM_CLIENT_URL";
pub const ENV_API_KEY: &str = "PRISM_CLIENT_API_KEY";

/// Connection settings for one search server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the search server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds, including reading the body
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_server_url() -> String {
    "http://localhost:8108".to_string()
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            api_key: String::new(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))
    }

    /// Override values from `PRISM_CLIENT_URL` / `PRISM_CLIENT_API_KEY`
    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(
            std::env::var(ENV_URL).ok(),
            std::env::var(ENV_API_KEY).ok(),
        );
        self
    }

    fn apply_overrides(&mut self, url: Option<String>, api_key: Option<String>) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.server_url = url;
        }
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
    }

    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.server_url, "http://localhost:8108");
        assert!(config.api_key.is_empty());
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
api_key = "abc"
request_timeout_ms = 1500
"#,
        )
        .unwrap();

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.server_url, "http://localhost:8108");
        assert_eq!(config.request_timeout(), Duration::from_millis(1500));
        assert_eq!(config.connect_timeout_ms, 5000);
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("client.toml");
        std::fs::write(
            &path,
            "server_url = \"https://search.example.com\"\napi_key = \"k\"\n",
        )
        .unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.server_url, "https://search.example.com");
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn test_invalid_toml() {
        let err = ClientConfig::from_toml_str("connect_timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let temp = tempdir().unwrap();
        let err = ClientConfig::load(temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = ClientConfig::default();
        config.apply_overrides(Some("http://10.0.0.1:8108".into()), Some(String::new()));
        assert_eq!(config.server_url, "http://10.0.0.1:8108");
        assert!(config.api_key.is_empty());

        config.apply_overrides(None, Some("secret".into()));
        assert_eq!(config.server_url, "http://10.0.0.1:8108");
        assert_eq!(config.api_key, "secret");
    }

    #[test]
    fn test_apply_env() {
        std::env::set_var(ENV_URL, "http://search.internal:8108");
        std::env::set_var(ENV_API_KEY, "");

        let config = ClientConfig {
            api_key: "from-file".to_string(),
            ..Default::default()
        }
        .apply_env();

        std::env::remove_var(ENV_URL);
        std::env::remove_var(ENV_API_KEY);

        assert_eq!(config.server_url, "http://search.internal:8108");
        assert_eq!(config.api_key, "from-file");
    }
}
