//! OAuth 2.0 client with PKCE support
//!
//! Builds the browser authorization URL and exchanges the returned code for
//! tokens. Refresh is intentionally absent: an expired token is handled by
//! signing in again.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::pkce::{validate_state, PkceChallenge};
use super::types::{OAuthConfig, OAuthError, TokenResponse};

/// Error type for OAuth client operations
#[derive(Debug, Error)]
pub enum OAuthClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("OAuth error: {0}")]
    OAuth(OAuthError),

    #[error("state mismatch in authorization callback")]
    StateMismatch,

    #[error("parse error: {0}")]
    Parse(String),
}

/// OAuth 2.0 client with PKCE support
#[derive(Debug, Clone)]
pub struct OAuthClient {
    config: OAuthConfig,
    http: Client,
}

impl OAuthClient {
    pub fn new(config: OAuthConfig) -> Self {
        Self::with_http_client(config, Client::new())
    }

    /// Reuse an existing (possibly pre-configured) reqwest client
    pub fn with_http_client(config: OAuthConfig, http: Client) -> Self {
        Self { config, http }
    }

    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Authorization URL for one attempt described by `challenge`
    pub fn authorization_url(&self, challenge: &PkceChallenge) -> String {
        let mut params = vec![
            ("response_type", "code".to_string()),
            ("client_id", self.config.client_id.clone()),
            ("redirect_uri", self.config.redirect_uri.clone()),
            ("scope", self.config.scope_string()),
            ("state", challenge.state.clone()),
            ("code_challenge", challenge.code_challenge.clone()),
            ("code_challenge_method", challenge.challenge_method().to_string()),
        ];
        params.extend(self.config.extra_authorize_params.iter().map(|(k, v)| (k.as_str(), v.clone())));

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.authorization_endpoint, query_string)
    }

    /// Validate the callback state and exchange `code` for tokens
    pub async fn exchange_code(
        &self,
        challenge: &PkceChallenge,
        code: &str,
        returned_state: &str,
    ) -> Result<TokenResponse, OAuthClientError> {
        if !validate_state(&challenge.state, returned_state) {
            return Err(OAuthClientError::StateMismatch);
        }

        let mut form = vec![
            ("grant_type", "authorization_code".to_string()),
            ("client_id", self.config.client_id.clone()),
            ("code", code.to_string()),
            ("redirect_uri", self.config.redirect_uri.clone()),
            ("code_verifier", challenge.code_verifier.clone()),
        ];
        if let Some(secret) = &self.config.client_secret {
            form.push(("client_secret", secret.clone()));
        }

        debug!(endpoint = %self.config.token_endpoint, "Exchanging authorization code");
        let response = self.http.post(&self.config.token_endpoint).form(&form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.json::<OAuthError>().await.unwrap_or_else(|_| OAuthError {
                error: format!("http_{}", status.as_u16()),
                error_description: None,
            });
            return Err(OAuthClientError::OAuth(error));
        }

        response.json::<TokenResponse>().await.map_err(|e| OAuthClientError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(token_endpoint: String) -> OAuthClient {
        OAuthClient::new(
            OAuthConfig::new(
                "https://accounts.example.com/auth",
                token_endpoint,
                "client-123",
                "http://127.0.0.1:5555/callback",
            )
            .with_scopes(["openid", "email"])
            .with_authorize_param("prompt", "consent"),
        )
    }

    #[test]
    fn authorization_url_carries_pkce_and_scopes() {
        let challenge = PkceChallenge::generate();
        let url = client("https://t".into()).authorization_url(&challenge);

        assert!(url.starts_with("https://accounts.example.com/auth?response_type=code"));
        assert!(url.contains("scope=openid%20email"));
        assert!(url.contains(&format!("code_challenge={}", challenge.code_challenge)));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A5555%2Fcallback"));
        assert!(url.ends_with("prompt=consent"));
    }

    #[tokio::test]
    async fn exchange_posts_verifier_and_parses_tokens() {
        let server = MockServer::start().await;
        let challenge = PkceChallenge::generate();
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains(format!("code_verifier={}", challenge.code_verifier)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.token",
                "expires_in": 3599,
                "token_type": "Bearer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client(format!("{}/token", server.uri()))
            .exchange_code(&challenge, "auth-code", &challenge.state)
            .await
            .unwrap();
        assert_eq!(tokens.access_token, "ya29.token");
    }

    #[tokio::test]
    async fn exchange_rejects_mismatched_state_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let challenge = PkceChallenge::generate();
        let result = client(format!("{}/token", server.uri())).exchange_code(&challenge, "code", "forged").await;
        assert!(matches!(result, Err(OAuthClientError::StateMismatch)));
    }

    #[tokio::test]
    async fn exchange_surfaces_oauth_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Malformed auth code."
            })))
            .mount(&server)
            .await;

        let challenge = PkceChallenge::generate();
        let err = client(format!("{}/token", server.uri()))
            .exchange_code(&challenge, "code", &challenge.state)
            .await
            .unwrap_err();
        assert!(matches!(err, OAuthClientError::OAuth(ref e) if e.error == "invalid_grant"));
    }
}
