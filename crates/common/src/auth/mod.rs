//! OAuth 2.0 + PKCE building blocks
//!
//! # Module Organization
//!
//! - **[`pkce`]**: PKCE challenge generation and state validation
//! - **[`types`]**: `OAuthConfig`, `TokenResponse`, `OAuthError`
//! - **[`client`]**: authorization URL building and code exchange
//!
//! ```text
//! OAuthClient ──► authorization_url(PkceChallenge) ──► browser
//!      │
//!      └──► exchange_code(code, state) ──► TokenResponse
//! ```

#[cfg(feature = "platform")]
pub mod client;
pub mod pkce;
pub mod types;

#[cfg(feature = "platform")]
pub use client::{OAuthClient, OAuthClientError};
pub use pkce::{generate_code_challenge, generate_code_verifier, generate_state, validate_state, PkceChallenge};
pub use types::{OAuthConfig, OAuthError, TokenResponse};
