//! Sign-in / sign-out lifecycle

use std::sync::Arc;

use daybook_domain::{DelegatedCredential, Result, UserSession};
use tokio::sync::watch;
use tracing::{error, info, warn};

use super::credential::CredentialContext;
use super::ports::IdentityProvider;

/// Couples the identity provider with the delegated credential cache.
pub struct SessionManager {
    identity: Arc<dyn IdentityProvider>,
    credentials: Arc<CredentialContext>,
}

impl SessionManager {
    pub fn new(identity: Arc<dyn IdentityProvider>, credentials: Arc<CredentialContext>) -> Self {
        Self { identity, credentials }
    }

    pub fn credentials(&self) -> &Arc<CredentialContext> {
        &self.credentials
    }

    /// Sign in and cache the delegated credential.
    ///
    /// A provider that grants identity without calendar access still yields
    /// a session. Any credential cached from an earlier sign-in is cleared,
    /// so provisioning then fails with `NoCredential`.
    pub async fn sign_in(&self) -> Result<UserSession> {
        let outcome = self.identity.sign_in().await.inspect_err(|err| error!(error = %err, "Sign-in failed"))?;

        match outcome.credential {
            Some(credential) => self.credentials.store(credential)?,
            None => {
                warn!(user_id = %outcome.session.user_id, "Sign-in returned no calendar credential");
                self.credentials.clear()?;
            }
        }

        info!(user_id = %outcome.session.user_id, "Signed in");
        Ok(outcome.session)
    }

    /// Clear both credential caches and end the base session.
    ///
    /// The session is terminated even when clearing storage fails; the first
    /// error is returned.
    pub async fn sign_out(&self) -> Result<()> {
        let cleared = self.credentials.clear();
        if let Err(err) = &cleared {
            error!(error = %err, "Failed to clear delegated credential");
        }

        self.identity.sign_out().await?;
        info!("Signed out");
        cleared
    }

    pub fn current_session(&self) -> Option<UserSession> {
        self.identity.current_session()
    }

    pub fn session_changes(&self) -> watch::Receiver<Option<UserSession>> {
        self.identity.session_changes()
    }

    /// Cached credential (lazy load on first call after restart).
    pub fn credential(&self) -> Result<Option<DelegatedCredential>> {
        self.credentials.get()
    }
}
