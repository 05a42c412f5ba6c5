//! Application context - dependency injection container

use std::sync::Arc;

use daybook_core::{
    ConferenceApi, CredentialContext, CredentialStorage, EventService, EventStore, IdentityProvider, SessionManager,
    VideoLinkProvisioner,
};
use daybook_domain::{Config, Result};
use daybook_infra::{
    credential_storage, event_store, GoogleConferenceApi, GoogleIdentityProvider, GoogleOAuthSettings, HttpClient,
};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Trait object for the identity provider port
pub type DynIdentityProvider = dyn IdentityProvider;

/// Trait object for the credential storage port
pub type DynCredentialStorage = dyn CredentialStorage;

/// Trait object for the event store port
pub type DynEventStore = dyn EventStore;

/// Trait object for the conference API port
pub type DynConferenceApi = dyn ConferenceApi;

/// Adapters the context is assembled from.
pub struct Components {
    pub identity: Arc<DynIdentityProvider>,
    pub credential_storage: Arc<DynCredentialStorage>,
    pub event_store: Arc<DynEventStore>,
    pub conference: Arc<DynConferenceApi>,
    /// IANA name of the host time zone, used for conference requests.
    pub time_zone: String,
}

impl Components {
    /// Production adapters selected by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = HttpClient::from_config(&config.http)?;

        Ok(Self {
            identity: Arc::new(GoogleIdentityProvider::new(GoogleOAuthSettings::from_config(&config.google), http.clone())),
            credential_storage: credential_storage(&config.storage)?,
            event_store: event_store(&config.storage)?,
            conference: Arc::new(GoogleConferenceApi::new(http, config.google.calendar_api_base.clone())),
            time_zone: host_time_zone(),
        })
    }
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub credentials: Arc<CredentialContext>,
    pub sessions: Arc<SessionManager>,
    pub events: Arc<EventService>,
    pub provisioner: Arc<VideoLinkProvisioner>,
    session_listener: Mutex<Option<JoinHandle<()>>>,
}

impl AppContext {
    /// Create the context with the adapters selected by `config`.
    ///
    /// Must run inside a tokio runtime: the session listener is spawned here.
    pub async fn new(config: Config) -> Result<Self> {
        let components = Components::from_config(&config)?;
        Self::with_components(config, components).await
    }

    /// Create the context from explicit adapters (tests, alternative
    /// frontends).
    pub async fn with_components(config: Config, components: Components) -> Result<Self> {
        let credentials = Arc::new(CredentialContext::new(components.credential_storage));
        let sessions = Arc::new(SessionManager::new(components.identity, Arc::clone(&credentials)));
        let events = Arc::new(EventService::new(components.event_store));
        let provisioner =
            Arc::new(VideoLinkProvisioner::new(components.conference, Arc::clone(&credentials), components.time_zone));

        let listener = Arc::clone(&events).spawn_session_listener(sessions.session_changes());
        info!("Daybook context initialised");

        Ok(Self {
            config,
            credentials,
            sessions,
            events,
            provisioner,
            session_listener: Mutex::new(Some(listener)),
        })
    }

    /// Stop following session changes and release the live subscription.
    pub async fn shutdown(&self) -> Result<()> {
        info!("shutdown called on AppContext");

        if let Some(listener) = self.session_listener.lock().await.take() {
            listener.abort();
        }
        self.events.detach().await;
        Ok(())
    }
}

/// IANA name of the host time zone, `UTC` when it cannot be determined.
pub fn host_time_zone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(zone) => zone,
        Err(err) => {
            warn!(error = %err, "Could not determine host time zone; using UTC");
            "UTC".to_string()
        }
    }
}
