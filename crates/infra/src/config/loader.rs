//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `DAYBOOK_GOOGLE_CLIENT_ID` is unset, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `DAYBOOK_GOOGLE_CLIENT_ID`: OAuth client id (required)
//! - `DAYBOOK_GOOGLE_CLIENT_SECRET`: OAuth client secret
//! - `DAYBOOK_CALENDAR_API_BASE`: Calendar REST base URL
//! - `DAYBOOK_CREDENTIAL_BACKEND`: `keychain`, `file` or `memory`
//! - `DAYBOOK_CREDENTIAL_PATH`: File path for the `file` backend
//! - `DAYBOOK_EVENTS_PATH`: JSON file for the event collection
//! - `DAYBOOK_HTTP_TIMEOUT_SECS`: Outbound request timeout in seconds
//! - `DAYBOOK_LOG_FILTER`: Default tracing filter
//! - `DAYBOOK_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./daybook.json` or `./daybook.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use daybook_domain::{Config, CredentialBackend, DaybookError, Result};

const FILE_NAMES: [&str; 4] = ["daybook.json", "daybook.toml", "config.json", "config.toml"];
const SEARCH_DIRS: [&str; 3] = [".", "..", "../.."];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the client id is
/// missing there, falls back to loading from a config file.
///
/// # Errors
/// Returns `DaybookError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A variable has an invalid value
pub fn load() -> Result<Config> {
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
/// Only `DAYBOOK_GOOGLE_CLIENT_ID` is required; everything else falls back
/// to the defaults of [`Config`].
///
/// # Errors
/// Returns `DaybookError::Config` if the client id is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.google.client_id = env_var("DAYBOOK_GOOGLE_CLIENT_ID")?;
    config.google.client_secret = optional_env_var("DAYBOOK_GOOGLE_CLIENT_SECRET");
    if let Some(base) = optional_env_var("DAYBOOK_CALENDAR_API_BASE") {
        config.google.calendar_api_base = base;
    }

    if let Some(backend) = optional_env_var("DAYBOOK_CREDENTIAL_BACKEND") {
        config.storage.backend = backend
            .parse::<CredentialBackend>()
            .map_err(|e| DaybookError::Config(format!("Invalid credential backend: {e}")))?;
    }
    config.storage.path = optional_env_var("DAYBOOK_CREDENTIAL_PATH");
    config.storage.events_path = optional_env_var("DAYBOOK_EVENTS_PATH");

    config.http.timeout_secs = optional_env_var("DAYBOOK_HTTP_TIMEOUT_SECS")
        .map(|s| s.parse::<u64>().map_err(|e| DaybookError::Config(format!("Invalid HTTP timeout: {e}"))))
        .transpose()?;

    if let Some(filter) = optional_env_var("DAYBOOK_LOG_FILTER") {
        config.logging.filter = filter;
    }
    config.logging.json = env_bool("DAYBOOK_LOG_JSON", false);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `DaybookError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DaybookError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DaybookError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DaybookError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `DaybookError::Config` if format is invalid or parsing fails.
pub fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| DaybookError::Config(format!("Invalid TOML format: {e}"))),
        "json" => {
            serde_json::from_str(contents).map_err(|e| DaybookError::Config(format!("Invalid JSON format: {e}")))
        }
        _ => Err(DaybookError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory and its two parents, then the same
/// relative locations next to the executable.
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

    roots.iter().flat_map(|root| candidates_under(root)).find(|path| path.exists())
}

/// Candidate config files relative to `root`, in probe order.
fn candidates_under(root: &Path) -> Vec<PathBuf> {
    SEARCH_DIRS
        .iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| root.join(dir).join(name)))
        .collect()
}

/// Get required environment variable
///
/// # Errors
/// Returns `DaybookError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key)
        .ok_or_else(|| DaybookError::Config(format!("Missing required environment variable: {key}")))
}

fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
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
