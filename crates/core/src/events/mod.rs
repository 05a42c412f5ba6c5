//! Event store port, live mirror and authoring service

pub mod mirror;
pub mod ports;
pub mod service;

pub use mirror::EventMirror;
pub use service::EventService;
