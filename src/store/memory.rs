//! In-process event store.
//!
//! Backs tests and offline development. Mirrors the remote contract:
//! documents get store-assigned ids (UUIDv4), queries return whole
//! collections.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use evently_core::error::EventlyResult;
use evently_core::protocol::Document;

use crate::store::EventStore;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with field maps, assigning ids as `set` would.
    pub async fn seed(&self, collection: &str, fields: Vec<serde_json::Value>) {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        for item in fields {
            documents.push(Document {
                id: Uuid::new_v4().to_string(),
                fields: item,
            });
        }
    }

}

#[async_trait]
impl EventStore for MemoryStore {
    async fn query(&self, collection: &str) -> EventlyResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn set(&self, collection: &str, fields: serde_json::Value) -> EventlyResult<Document> {
        let document = Document {
            id: Uuid::new_v4().to_string(),
            fields,
        };

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }
}
