//! Calendar range resolution and event placement
//!
//! Pure, synchronous functions with no shared state; safe to call repeatedly
//! from any thread.

pub mod placement;
pub mod range;

pub use placement::{events_for_date, is_visible_on, place_events, timed_block};
pub use range::{resolve_range, start_of_week};
