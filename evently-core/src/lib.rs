//! Core types for the evently ecosystem.
//!
//! This crate provides shared types used by both the evently engine and
//! store backends:
//! - `Event` and related types for calendar events
//! - `agenda` module for day bucketing and ordering
//! - `protocol` module for the engine-backend communication protocol

pub mod agenda;
pub mod error;
pub mod event;
pub mod month;
pub mod protocol;

// Re-export all event types at crate root for convenience
pub use event::*;
