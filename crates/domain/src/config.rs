//! Configuration structures
//!
//! Loaded by `adtkit_infra::config` from the environment or a TOML/JSON file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LANGUAGE, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_SECS,
};

/// Top-level client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdtConfig {
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How to reach and authenticate against the SAP system
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Base URL, e.g. `https://sap.example.com:44300`; a path prefix is kept
    pub url: String,
    pub username: String,
    pub password: String,
    /// SAP client (`sap-client` query parameter)
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Total attempts for idempotent requests (1 disables retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client", &self.client)
            .field("language", &self.language)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_attempts", &self.max_attempts)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl ConnectionConfig {
    /// Connection settings with defaults for everything but credentials.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            client: None,
            language: default_language(),
            timeout_seconds: default_timeout_seconds(),
            max_attempts: default_max_attempts(),
            accept_invalid_certs: false,
        }
    }
}

/// Defaults applied by the lifecycle driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LifecycleConfig {
    #[serde(default = "default_true")]
    pub activate: bool,
    #[serde(default)]
    pub delete_on_failure: bool,
    #[serde(default = "default_poll_attempts")]
    pub poll_attempts: u32,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            activate: true,
            delete_on_failure: false,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `adtkit_infra=debug,info`
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_poll_attempts() -> u32 {
    DEFAULT_POLL_ATTEMPTS
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_password() {
        let config = ConnectionConfig::new("https://sap.local", "DEVELOPER", "s3cret");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: AdtConfig = toml::from_str(
            r#"
[connection]
url = "https://sap.local"
username = "DEVELOPER"
password = "pw"
"#,
        )
        .unwrap();

        assert_eq!(config.connection.language, "EN");
        assert_eq!(config.connection.max_attempts, 1);
        assert!(config.lifecycle.activate);
        assert!(!config.lifecycle.delete_on_failure);
        assert_eq!(config.logging.filter, "info");
    }
}
