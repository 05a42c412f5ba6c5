//! Error types used throughout the application

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Daybook
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DaybookError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Daybook operations
pub type Result<T> = std::result::Result<T, DaybookError>;

/// Authoring errors caught before any remote call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: NaiveDateTime, end: NaiveDateTime },
}

/// Failure kinds of the video-link provisioning flow.
///
/// Every variant is terminal for the invocation that produced it; callers
/// re-invoke from the idle state.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ProvisionError {
    #[error("no delegated calendar credential available")]
    NoCredential,

    #[error("calendar API rejected the credential")]
    Unauthorized,

    #[error("calendar API is not enabled for this account or project")]
    ApiNotEnabled,

    #[error("calendar API returned status {status}")]
    Provision { status: u16 },

    #[error("calendar API response contained no video join link")]
    LinkNotFound,

    #[error("calendar API request failed: {0}")]
    Transport(String),
}

impl ProvisionError {
    /// Whether the caller should prompt the user to sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::NoCredential | Self::Unauthorized)
    }

    /// User-facing guidance for this failure.
    pub fn remedy(&self) -> &'static str {
        match self {
            Self::NoCredential | Self::Unauthorized => {
                "Sign out and sign back in to grant Calendar permissions, then try again."
            }
            Self::ApiNotEnabled => {
                "Enable the Google Calendar API for this project, then sign out and sign back in."
            }
            Self::Provision { .. } | Self::LinkNotFound | Self::Transport(_) => {
                "Failed to generate a Meet link. Please try again."
            }
        }
    }
}
