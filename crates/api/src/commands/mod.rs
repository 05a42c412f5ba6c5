//! Presentation-facing commands

mod auth;
mod calendar;
mod events;
mod meet;

pub use auth::*;
pub use calendar::*;
pub use events::*;
pub use meet::*;
