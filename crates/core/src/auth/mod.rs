//! Identity session and delegated credential lifecycle

pub mod credential;
pub mod ports;
pub mod session;

pub use credential::CredentialContext;
pub use session::SessionManager;
