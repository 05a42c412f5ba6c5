//! # Daybook Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Range resolution and event placement for month/week/day views
//! - Port/adapter interfaces (traits)
//! - Services: event mirror, credential context, sessions, link provisioning
//!
//! ## Architecture Principles
//! - Only depends on `daybook-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod calendar;
pub mod events;
pub mod meet;

// Re-export specific items to avoid ambiguity
pub use auth::ports::{CredentialStorage, IdentityProvider};
pub use auth::{CredentialContext, SessionManager};
pub use calendar::{events_for_date, is_visible_on, place_events, resolve_range};
pub use events::ports::{EventStore, SnapshotCallback, Subscription};
pub use events::{EventMirror, EventService};
pub use meet::ports::ConferenceApi;
pub use meet::VideoLinkProvisioner;
