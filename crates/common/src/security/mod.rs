//! Security primitives: platform keychain access

pub mod keychain;

pub use keychain::{KeychainError, KeychainProvider};
