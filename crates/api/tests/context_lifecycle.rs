//! Context construction from configuration

use daybook_domain::{Config, CredentialBackend, DaybookError, DelegatedCredential, GoogleConfig, StorageConfig};
use daybook_lib::{session_status, AppContext};

fn config(storage: StorageConfig) -> Config {
    Config {
        google: GoogleConfig { client_id: "client-123.apps.googleusercontent.com".into(), ..GoogleConfig::default() },
        storage,
        ..Config::default()
    }
}

#[tokio::test]
async fn file_backed_context_persists_credential_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json").display().to_string();
    let storage = StorageConfig { backend: CredentialBackend::File, path: Some(path), ..StorageConfig::default() };

    let first = AppContext::new(config(storage.clone())).await.unwrap();
    first.credentials.store(DelegatedCredential::new("ya29.persisted")).unwrap();
    first.shutdown().await.unwrap();

    let second = AppContext::new(config(storage)).await.unwrap();
    let status = session_status(&second).unwrap();
    assert!(status.has_calendar_access);
    assert!(status.session.is_none());
    second.shutdown().await.unwrap();
}

#[tokio::test]
async fn file_backend_without_path_is_a_config_error() {
    let storage = StorageConfig { backend: CredentialBackend::File, path: None, ..StorageConfig::default() };

    let result = AppContext::new(config(storage)).await;

    assert!(matches!(result, Err(DaybookError::Config(_))));
}

#[tokio::test]
async fn memory_backed_context_starts_signed_out() {
    let storage = StorageConfig { backend: CredentialBackend::Memory, ..StorageConfig::default() };

    let ctx = AppContext::new(config(storage)).await.unwrap();

    assert!(ctx.sessions.current_session().is_none());
    assert!(ctx.events.events().is_empty());
    assert!(!session_status(&ctx).unwrap().has_calendar_access);
    assert!(!ctx.provisioner.state().is_in_flight());
}
