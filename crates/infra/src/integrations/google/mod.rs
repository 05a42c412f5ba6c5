//! Google integrations: Calendar conference provisioning and sign-in

pub mod callback;
pub mod conference;
pub mod identity;
pub mod types;

pub use callback::{CallbackParams, CallbackServer};
pub use conference::GoogleConferenceApi;
pub use identity::{BrowserLauncher, GoogleIdentityProvider, GoogleOAuthSettings};
