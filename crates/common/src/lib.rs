//! Common utilities shared across Daybook crates.
//!
//! # Feature Tiers
//!
//! - `foundation`: PKCE helpers and OAuth wire types
//! - `platform`: OAuth HTTP client and platform keychain access

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod auth;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod security;

#[cfg(feature = "foundation")]
pub use auth::{OAuthConfig, PkceChallenge, TokenResponse};
#[cfg(feature = "platform")]
pub use security::{KeychainError, KeychainProvider};
