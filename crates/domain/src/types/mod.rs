//! Domain types and models

pub mod auth;
pub mod conference;
pub mod event;
pub mod grid;
pub mod view;

pub use auth::{DelegatedCredential, SignInOutcome, UserSession};
pub use conference::{ConferenceEvent, ConferenceEventRequest, EntryPoint, ProvisionState};
pub use event::{CalendarEvent, EventColor, EventDraft, EventKind, EventUpdate};
pub use grid::{DayBucket, DayCell, DayTimeline, EventPlacement, HourSlot, RangeDescriptor, TimedBlock};
pub use view::{ViewMode, ViewState};
