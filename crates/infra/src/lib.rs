//! # Daybook Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Configuration loading (environment and JSON/TOML files)
//! - HTTP client and error conversions
//! - Google integrations (Calendar conference links, OAuth sign-in)
//! - Credential storage backends (keychain, file, memory)
//! - Event stores (in-memory and JSON file)
//!
//! ## Architecture
//! - Implements traits defined in `daybook-core`
//! - Depends on `daybook-common`, `daybook-domain` and `daybook-core`
//! - Contains all "impure" code (I/O, network, platform keychain)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod storage;
pub mod store;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::google::{GoogleConferenceApi, GoogleIdentityProvider, GoogleOAuthSettings};
pub use storage::{
    credential_storage, FileCredentialStorage, KeychainCredentialStorage, MemoryCredentialStorage,
};
pub use store::{event_store, FileEventStore, InMemoryEventStore};
