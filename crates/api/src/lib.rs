//! # Daybook App
//!
//! Application layer - commands and the CLI entry point.
//!
//! This crate contains:
//! - Commands (presentation layer → services bridge)
//! - Application context (dependency injection)
//! - Tracing setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Commands return serialisable DTOs for any frontend

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
