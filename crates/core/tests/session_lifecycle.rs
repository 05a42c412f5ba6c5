mod support;

use std::sync::Arc;

use daybook_core::{CredentialContext, SessionManager};
use daybook_domain::constants::CREDENTIAL_STORAGE_KEY;
use support::identity::{MapStorage, MockIdentityProvider};

fn manager(storage: &MapStorage, token: Option<&str>) -> SessionManager {
    SessionManager::new(
        Arc::new(MockIdentityProvider::new("user-1", token)),
        Arc::new(CredentialContext::new(Arc::new(storage.clone()))),
    )
}

#[tokio::test]
async fn sign_in_caches_credential_in_memory_and_storage() {
    let storage = MapStorage::default();
    let manager = manager(&storage, Some("ya29.token"));

    let session = manager.sign_in().await.unwrap();
    assert_eq!(session.user_id, "user-1");
    assert_eq!(storage.value(CREDENTIAL_STORAGE_KEY).as_deref(), Some("ya29.token"));
    assert_eq!(manager.credential().unwrap().unwrap().expose(), "ya29.token");
    assert_eq!(manager.current_session(), Some(session));
}

#[tokio::test]
async fn sign_out_clears_both_caches_and_session() {
    let storage = MapStorage::default();
    let manager = manager(&storage, Some("ya29.token"));
    manager.sign_in().await.unwrap();

    manager.sign_out().await.unwrap();
    assert!(storage.value(CREDENTIAL_STORAGE_KEY).is_none());
    assert!(manager.credential().unwrap().is_none());
    assert!(manager.current_session().is_none());
}

#[tokio::test]
async fn restart_restores_credential_lazily_from_storage() {
    let storage = MapStorage::default();
    manager(&storage, Some("ya29.token")).sign_in().await.unwrap();

    // A fresh manager over the same storage simulates a process restart.
    let restarted = manager(&storage, None);
    assert!(restarted.current_session().is_none());
    assert_eq!(restarted.credential().unwrap().unwrap().expose(), "ya29.token");
}

#[tokio::test]
async fn sign_in_without_calendar_grant_still_succeeds() {
    let storage = MapStorage::default();
    let manager = manager(&storage, None);

    manager.sign_in().await.unwrap();
    assert!(manager.credential().unwrap().is_none());
}

#[tokio::test]
async fn sign_in_without_calendar_grant_drops_earlier_credential() {
    let storage = MapStorage::with(CREDENTIAL_STORAGE_KEY, "ya29.previous-account");
    let manager = manager(&storage, None);
    assert!(manager.credential().unwrap().is_some());

    manager.sign_in().await.unwrap();

    assert!(manager.credential().unwrap().is_none());
    assert!(storage.value(CREDENTIAL_STORAGE_KEY).is_none());
}

#[tokio::test]
async fn session_changes_are_published() {
    let storage = MapStorage::default();
    let manager = manager(&storage, Some("t"));
    let mut changes = manager.session_changes();

    manager.sign_in().await.unwrap();
    assert!(changes.has_changed().unwrap());
    assert!(changes.borrow_and_update().is_some());

    manager.sign_out().await.unwrap();
    assert!(changes.borrow_and_update().is_none());
}
