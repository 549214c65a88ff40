//! Event store clients.
//!
//! The engine talks to the document store through the narrow
//! [`EventStore`] trait: query a collection, write a document. The
//! remote implementation drives an external backend binary; the memory
//! implementation backs tests and offline development.
//!
//! Typed decoding happens here, at the client boundary: documents that
//! fail to decode into an `Event` are quarantined with a log line and
//! never reach the bucketer.

mod memory;
mod provider;
mod remote;

pub use memory::MemoryStore;
pub use provider::Provider;
pub use remote::RemoteStore;

use async_trait::async_trait;
use tracing::warn;

use evently_core::error::EventlyResult;
use evently_core::event::Event;
use evently_core::protocol::Document;

/// Narrow client contract against the remote document store.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Return all documents in a named collection. No filtering or
    /// pagination; month filtering is client-side.
    async fn query(&self, collection: &str) -> EventlyResult<Vec<Document>>;

    /// Write a new document to a collection; the store assigns the id.
    async fn set(&self, collection: &str, fields: serde_json::Value) -> EventlyResult<Document>;
}

/// Decode raw documents into events, quarantining the undecodable ones.
/// A quarantined document is logged and dropped; it does not fail the
/// surrounding load.
pub fn decode_events(documents: Vec<Document>) -> Vec<Event> {
    let mut events = Vec::with_capacity(documents.len());
    for document in documents {
        match Event::from_document(&document) {
            Ok(event) => events.push(event),
            Err(err) => warn!(id = %document.id, %err, "quarantined event document"),
        }
    }
    events
}
