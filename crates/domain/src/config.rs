//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SIGN_IN_TIMEOUT_SECS, GOOGLE_CALENDAR_API_BASE, KEYCHAIN_SERVICE_NAME};
use crate::impl_domain_status_conversions;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub google: GoogleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Google OAuth client and Calendar API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,
    #[serde(default = "default_calendar_api_base")]
    pub calendar_api_base: String,
    #[serde(default = "default_sign_in_timeout")]
    pub sign_in_timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: None,
            calendar_api_base: default_calendar_api_base(),
            sign_in_timeout_secs: default_sign_in_timeout(),
        }
    }
}

/// Where the delegated credential is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    #[default]
    Keychain,
    File,
    Memory,
}

impl_domain_status_conversions!(CredentialBackend {
    Keychain => "keychain",
    File => "file",
    Memory => "memory",
});

/// Credential and event storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: CredentialBackend,
    /// File path for the `file` backend.
    #[serde(default)]
    pub path: Option<String>,
    /// Keychain service name for the `keychain` backend.
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// JSON file holding the event collection. Unset keeps events in
    /// memory for the lifetime of the process.
    #[serde(default)]
    pub events_path: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: CredentialBackend::default(),
            path: None,
            service_name: default_service_name(),
            events_path: None,
        }
    }
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout; unset means calls may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: None, user_agent: default_user_agent() }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
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

fn default_calendar_api_base() -> String {
    GOOGLE_CALENDAR_API_BASE.to_string()
}

fn default_sign_in_timeout() -> u64 {
    DEFAULT_SIGN_IN_TIMEOUT_SECS
}

fn default_service_name() -> String {
    KEYCHAIN_SERVICE_NAME.to_string()
}

fn default_user_agent() -> String {
    format!("daybook/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_filter() -> String {
    "info".to_string()
}
