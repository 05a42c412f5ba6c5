//! Identity session and delegated credential types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    /// Stable provider subject; owns the user's events.
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl UserSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), email: None, display_name: None }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Opaque bearer token scoped to the calendar API.
///
/// Expiry is controlled by the issuer and not tracked here; a stale token
/// only surfaces when a dependent call is rejected.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DelegatedCredential(String);

impl DelegatedCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for DelegatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DelegatedCredential([REDACTED])")
    }
}

/// What a successful sign-in produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    pub session: UserSession,
    /// Absent when the provider granted identity but no calendar access.
    pub credential: Option<DelegatedCredential>,
}
