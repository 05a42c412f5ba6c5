//! # Daybook Domain
//!
//! Business domain types and models for Daybook.
//!
//! This crate contains:
//! - Calendar data types (CalendarEvent, EventDraft, EventUpdate, ViewState)
//! - Resolved grid types (RangeDescriptor, EventPlacement)
//! - Identity and video-conference types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Daybook crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
