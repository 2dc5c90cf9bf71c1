//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment, if one exists
//! 2. Attempts to load from environment variables
//! 3. If incomplete, falls back to loading from file
//! 4. Probes multiple paths for config files (JSON or TOML)
//!
//! ## Environment Variables
//! - `SAP_URL`: Base URL of the SAP system (required)
//! - `SAP_USERNAME`: Logon user (required)
//! - `SAP_PASSWORD`: Logon password (required)
//! - `SAP_CLIENT`: SAP client, sent as `sap-client`
//! - `SAP_LANGUAGE`: Logon language, default `EN`
//! - `ADTKIT_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `ADTKIT_MAX_ATTEMPTS`: Attempts for idempotent requests
//! - `ADTKIT_ACCEPT_INVALID_CERTS`: Skip TLS verification (true/false)
//! - `ADTKIT_LOG`: `EnvFilter` directive for the tracing subscriber
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./adtkit.{json,toml}` or `./config.{json,toml}` (current directory)
//! 2. The same names in the parent and grandparent directory
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use adtkit_domain::{
    AdtConfig, AdtError, ConnectionConfig, LifecycleConfig, LoggingConfig, Result,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["adtkit.json", "adtkit.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables (after reading
/// `.env`). If any required variables are missing, falls back to loading
/// from a config file.
///
/// # Errors
/// Returns `AdtError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<AdtConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Read .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `SAP_URL`, `SAP_USERNAME` and `SAP_PASSWORD` must be present; the other
/// variables fall back to defaults.
///
/// # Errors
/// Returns `AdtError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<AdtConfig> {
    let mut connection =
        ConnectionConfig::new(env_var("SAP_URL")?, env_var("SAP_USERNAME")?, env_var("SAP_PASSWORD")?);

    connection.client = std::env::var("SAP_CLIENT").ok().filter(|c| !c.is_empty());
    if let Ok(language) = std::env::var("SAP_LANGUAGE") {
        connection.language = language;
    }
    if let Some(timeout) = env_parse::<u64>("ADTKIT_TIMEOUT_SECS", "timeout")? {
        connection.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse::<usize>("ADTKIT_MAX_ATTEMPTS", "max attempts")? {
        connection.max_attempts = attempts.max(1);
    }
    connection.accept_invalid_certs = env_bool("ADTKIT_ACCEPT_INVALID_CERTS", false);

    let mut logging = LoggingConfig::default();
    if let Ok(filter) = std::env::var("ADTKIT_LOG") {
        logging.filter = filter;
    }

    Ok(AdtConfig { connection, lifecycle: LifecycleConfig::default(), logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AdtError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<AdtConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AdtError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AdtError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AdtError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<AdtConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AdtError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AdtError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AdtError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent and grandparent,
/// then the executable's directory and its parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `AdtError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| AdtError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse an optional numeric environment variable
fn env_parse<T: std::str::FromStr>(key: &str, what: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|s| s.trim().parse::<T>().map_err(|e| AdtError::Config(format!("Invalid {what}: {e}"))))
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
