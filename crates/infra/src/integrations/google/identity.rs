//! Google sign-in through the system browser
//!
//! Runs the OAuth 2.0 authorization-code flow with PKCE against a loopback
//! redirect, then resolves the signed-in user through the OpenID Connect
//! userinfo endpoint. The access token doubles as the delegated Calendar
//! credential when the calendar scope was granted.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use daybook_common::auth::{OAuthClient, OAuthConfig, PkceChallenge, TokenResponse};
use daybook_core::IdentityProvider;
use daybook_domain::constants::{
    GOOGLE_AUTHORIZATION_ENDPOINT, GOOGLE_CALENDAR_SCOPES, GOOGLE_TOKEN_ENDPOINT, GOOGLE_USERINFO_ENDPOINT,
};
use daybook_domain::{DaybookError, DelegatedCredential, GoogleConfig, Result, SignInOutcome, UserSession};
use reqwest::Method;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::callback::CallbackServer;
use super::types::GoogleUserInfo;
use crate::errors::InfraError;
use crate::http::HttpClient;

const CALENDAR_EVENTS_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// Opens the authorization URL for the user.
pub type BrowserLauncher = Arc<dyn Fn(&str) -> std::io::Result<()> + Send + Sync>;

/// Endpoints and client registration for the Google sign-in flow
#[derive(Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    pub scopes: Vec<String>,
    pub sign_in_timeout: Duration,
}

impl GoogleOAuthSettings {
    pub fn from_config(config: &GoogleConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            authorization_endpoint: GOOGLE_AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: GOOGLE_TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: GOOGLE_USERINFO_ENDPOINT.to_string(),
            scopes: GOOGLE_CALENDAR_SCOPES.iter().map(|s| (*s).to_string()).collect(),
            sign_in_timeout: Duration::from_secs(config.sign_in_timeout_secs),
        }
    }
}

impl fmt::Debug for GoogleOAuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleOAuthSettings")
            .field("client_id", &self.client_id)
            .field("authorization_endpoint", &self.authorization_endpoint)
            .field("token_endpoint", &self.token_endpoint)
            .field("userinfo_endpoint", &self.userinfo_endpoint)
            .field("scopes", &self.scopes)
            .field("sign_in_timeout", &self.sign_in_timeout)
            .finish_non_exhaustive()
    }
}

/// [`IdentityProvider`] backed by Google accounts
pub struct GoogleIdentityProvider {
    settings: GoogleOAuthSettings,
    http: HttpClient,
    launcher: BrowserLauncher,
    session: watch::Sender<Option<UserSession>>,
}

impl GoogleIdentityProvider {
    /// Provider that opens the system browser for sign-in.
    pub fn new(settings: GoogleOAuthSettings, http: HttpClient) -> Self {
        Self::with_launcher(settings, http, Arc::new(|url: &str| open::that(url)))
    }

    pub fn with_launcher(settings: GoogleOAuthSettings, http: HttpClient, launcher: BrowserLauncher) -> Self {
        let (session, _) = watch::channel(None);
        Self { settings, http, launcher, session }
    }

    fn oauth_client(&self, redirect_uri: String) -> OAuthClient {
        let config = OAuthConfig::new(
            self.settings.authorization_endpoint.clone(),
            self.settings.token_endpoint.clone(),
            self.settings.client_id.clone(),
            redirect_uri,
        )
        .with_scopes(self.settings.scopes.iter().cloned())
        .with_client_secret(self.settings.client_secret.clone())
        .with_authorize_param("include_granted_scopes", "true")
        .with_authorize_param("prompt", "select_account");

        OAuthClient::with_http_client(config, self.http.inner().clone())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<UserSession> {
        let builder = self.http.request(Method::GET, &self.settings.userinfo_endpoint).bearer_auth(access_token);
        let response = self.http.send(builder).await?.error_for_status().map_err(InfraError::from)?;
        let info: GoogleUserInfo = response.json().await.map_err(InfraError::from)?;
        Ok(info.into())
    }
}

/// The access token is only useful as a Calendar credential when the
/// events scope was granted. Servers that omit `scope` granted everything
/// requested.
fn delegated_credential(tokens: &TokenResponse) -> Option<DelegatedCredential> {
    let granted = tokens.scope.is_none() || tokens.has_scope(CALENDAR_EVENTS_SCOPE);
    (granted && !tokens.access_token.is_empty()).then(|| DelegatedCredential::new(tokens.access_token.clone()))
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn sign_in(&self) -> Result<SignInOutcome> {
        if self.settings.client_id.trim().is_empty() {
            return Err(DaybookError::Config("Google OAuth client id is not configured".into()));
        }

        let mut server = CallbackServer::start().await?;
        let client = self.oauth_client(server.redirect_uri());
        let challenge = PkceChallenge::generate();
        let url = client.authorization_url(&challenge);

        debug!(redirect_uri = %client.config().redirect_uri, "Opening browser for Google sign-in");
        if let Err(err) = (self.launcher)(&url) {
            warn!(error = %err, "Could not open a browser; open this URL to continue: {}", url);
        }

        let callback = server.wait(self.settings.sign_in_timeout).await?;
        drop(server);

        let tokens = client
            .exchange_code(&challenge, &callback.code, &callback.state)
            .await
            .map_err(|err| DaybookError::from(InfraError::from(err)))?;

        let session = self.fetch_user(&tokens.access_token).await?;
        let credential = delegated_credential(&tokens);

        info!(user_id = %session.user_id, calendar_access = credential.is_some(), "Signed in with Google");
        self.session.send_replace(Some(session.clone()));

        Ok(SignInOutcome { session, credential })
    }

    async fn sign_out(&self) -> Result<()> {
        if let Some(previous) = self.session.send_replace(None) {
            info!(user_id = %previous.user_id, "Signed out of Google");
        }
        Ok(())
    }

    fn current_session(&self) -> Option<UserSession> {
        self.session.borrow().clone()
    }

    fn session_changes(&self) -> watch::Receiver<Option<UserSession>> {
        self.session.subscribe()
    }
}
