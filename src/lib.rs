//! Agenda aggregation engine for the evently app.
//!
//! Sits between a remote document store and the rendering layer: loads
//! raw event documents month by month, buckets them by UTC day, orders
//! each day, and publishes the result into a shared agenda state the UI
//! reads from. Store backends are external `evently-store-<name>`
//! binaries spoken to over JSON stdin/stdout; tests use the in-process
//! `MemoryStore`.

pub mod calendar;
pub mod config;
pub mod net;
pub mod state;
pub mod store;

pub use calendar::Calendar;
pub use config::EventlyConfig;
pub use net::{AlwaysOnline, NetworkStatus};
pub use state::AgendaState;
pub use store::{decode_events, EventStore, MemoryStore, Provider, RemoteStore};

// Re-export the shared types so embedders depend on one crate
pub use evently_core::agenda::{aggregate_month, bucket_by_day, day_key, sort_day, Days};
pub use evently_core::error::{scope, EventlyError, EventlyResult, Signal};
pub use evently_core::month::VisibleMonth;
pub use evently_core::protocol::Document;
pub use evently_core::{Category, Event, EventDraft, Visibility};
