//! Port interfaces for identity and credential storage
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use daybook_domain::{Result, SignInOutcome, UserSession};
use tokio::sync::watch;

/// Trait for the third-party identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the interactive sign-in flow
    async fn sign_in(&self) -> Result<SignInOutcome>;

    /// Terminate the base session
    async fn sign_out(&self) -> Result<()>;

    /// Currently signed-in user, if any
    fn current_session(&self) -> Option<UserSession>;

    /// Notified whenever the session flips between present and absent
    fn session_changes(&self) -> watch::Receiver<Option<UserSession>>;
}

/// Durable client-local key/value storage
pub trait CredentialStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
