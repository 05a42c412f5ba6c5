//! Shared helpers for `daybook-app` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use daybook_core::IdentityProvider;
use daybook_domain::{Config, DelegatedCredential, Result as DomainResult, SignInOutcome, UserSession};
use daybook_infra::{GoogleConferenceApi, HttpClient, InMemoryEventStore, MemoryCredentialStorage};
use daybook_lib::{AppContext, Components};
use tokio::sync::watch;

/// Identity provider that signs in a fixed user without a browser.
pub struct FakeIdentity {
    session: UserSession,
    token: Option<&'static str>,
    tx: watch::Sender<Option<UserSession>>,
}

impl FakeIdentity {
    pub fn new(user_id: &str, token: Option<&'static str>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { session: UserSession::new(user_id).with_display_name("Ada Lovelace"), token, tx }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_in(&self) -> DomainResult<SignInOutcome> {
        self.tx.send_replace(Some(self.session.clone()));
        Ok(SignInOutcome { session: self.session.clone(), credential: self.token.map(DelegatedCredential::new) })
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

pub struct TestApp {
    pub ctx: AppContext,
    pub store: InMemoryEventStore,
}

/// Context over in-memory adapters; the conference API points at `api_base`.
pub async fn test_app(token: Option<&'static str>, api_base: &str) -> TestApp {
    let store = InMemoryEventStore::new();
    let components = Components {
        identity: Arc::new(FakeIdentity::new("user-1", token)),
        credential_storage: Arc::new(MemoryCredentialStorage::new()),
        event_store: Arc::new(store.clone()),
        conference: Arc::new(GoogleConferenceApi::new(HttpClient::new().unwrap(), api_base)),
        time_zone: "Europe/Berlin".to_string(),
    };
    let ctx = AppContext::with_components(Config::default(), components).await.unwrap();
    TestApp { ctx, store }
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Poll until `condition` holds; snapshots reach the mirror asynchronously.
pub async fn wait_for(condition: impl Fn() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    panic!("condition not reached");
}
