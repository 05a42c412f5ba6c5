use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use daybook_core::{CredentialStorage, IdentityProvider};
use daybook_domain::{DelegatedCredential, Result as DomainResult, SignInOutcome, UserSession};
use tokio::sync::watch;

/// Mock identity provider that signs in a fixed user.
pub struct MockIdentityProvider {
    session: UserSession,
    credential: Option<DelegatedCredential>,
    tx: watch::Sender<Option<UserSession>>,
}

impl MockIdentityProvider {
    pub fn new(user_id: &str, token: Option<&str>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            session: UserSession::new(user_id).with_email(format!("{user_id}@example.com")),
            credential: token.map(DelegatedCredential::new),
            tx,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self) -> DomainResult<SignInOutcome> {
        self.tx.send_replace(Some(self.session.clone()));
        Ok(SignInOutcome { session: self.session.clone(), credential: self.credential.clone() })
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.tx.send_replace(None);
        Ok(())
    }

    fn current_session(&self) -> Option<UserSession> {
        self.tx.borrow().clone()
    }

    fn session_changes(&self) -> watch::Receiver<Option<UserSession>> {
        self.tx.subscribe()
    }
}

/// HashMap-backed `CredentialStorage`, shareable between "process runs".
#[derive(Default, Clone)]
pub struct MapStorage {
    pub values: Arc<Mutex<HashMap<String, String>>>,
}

impl MapStorage {
    pub fn with(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage.values.lock().unwrap().insert(key.to_string(), value.to_string());
        storage
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl CredentialStorage for MapStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        self.values.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
