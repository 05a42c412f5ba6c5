//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use daybook_common::auth::OAuthClientError;
use daybook_common::security::KeychainError;
use daybook_domain::DaybookError;
use keyring::Error as KeyringError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DaybookError);

impl From<InfraError> for DaybookError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DaybookError> for InfraError {
    fn from(value: DaybookError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDaybookError {
    fn into_daybook(self) -> DaybookError;
}

/* -------------------------------------------------------------------------- */
/* keyring::Error → DaybookError */
/* -------------------------------------------------------------------------- */

impl IntoDaybookError for KeyringError {
    fn into_daybook(self) -> DaybookError {
        use KeyringError::*;

        let description = self.to_string();

        match self {
            NoEntry => DaybookError::NotFound("keychain entry not found".into()),
            BadEncoding(_) => DaybookError::Storage("credential in keychain is not valid UTF-8".into()),
            TooLong(name, limit) => {
                DaybookError::Storage(format!("keychain attribute '{name}' exceeds platform limit ({limit})"))
            }
            Invalid(attr, reason) => DaybookError::Storage(format!("keychain attribute '{attr}' is invalid: {reason}")),
            Ambiguous(entries) => {
                DaybookError::Storage(format!("multiple keychain entries matched request ({} results)", entries.len()))
            }
            PlatformFailure(err) => DaybookError::Storage(format!("keychain platform error: {err}")),
            NoStorageAccess(err) => DaybookError::Storage(format!("unable to access secure storage: {err}")),
            _ => DaybookError::Storage(description),
        }
    }
}

impl From<KeyringError> for InfraError {
    fn from(value: KeyringError) -> Self {
        InfraError(value.into_daybook())
    }
}

impl From<KeychainError> for InfraError {
    fn from(value: KeychainError) -> Self {
        InfraError(DaybookError::Storage(value.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DaybookError */
/* -------------------------------------------------------------------------- */

impl IntoDaybookError for HttpError {
    fn into_daybook(self) -> DaybookError {
        if self.is_timeout() {
            return DaybookError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return DaybookError::Transport("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message = format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => DaybookError::Auth(message),
                404 | 410 => DaybookError::NotFound(message),
                _ => DaybookError::Transport(message),
            };
        }

        if self.is_decode() {
            return DaybookError::Transport(format!("invalid response body: {self}"));
        }

        DaybookError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_daybook())
    }
}

/* -------------------------------------------------------------------------- */
/* OAuth client errors → DaybookError */
/* -------------------------------------------------------------------------- */

impl IntoDaybookError for OAuthClientError {
    fn into_daybook(self) -> DaybookError {
        match self {
            OAuthClientError::RequestFailed(err) => err.into_daybook(),
            OAuthClientError::OAuth(err) => DaybookError::Auth(format!("token exchange rejected: {err}")),
            OAuthClientError::StateMismatch => {
                DaybookError::Auth("authorization callback state did not match".into())
            }
            OAuthClientError::Parse(message) => {
                DaybookError::Auth(format!("token response could not be parsed: {message}"))
            }
        }
    }
}

impl From<OAuthClientError> for InfraError {
    fn from(value: OAuthClientError) -> Self {
        InfraError(value.into_daybook())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json / io → DaybookError */
/* -------------------------------------------------------------------------- */

impl IntoDaybookError for JsonError {
    fn into_daybook(self) -> DaybookError {
        DaybookError::Storage(format!("invalid JSON at line {} column {}: {self}", self.line(), self.column()))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_daybook())
    }
}

impl IntoDaybookError for IoError {
    fn into_daybook(self) -> DaybookError {
        match self.kind() {
            ErrorKind::NotFound => DaybookError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => DaybookError::Storage(format!("permission denied: {self}")),
            _ => DaybookError::Storage(self.to_string()),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_daybook())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
