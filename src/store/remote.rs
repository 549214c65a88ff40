//! Remote store operations via backend binaries.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use evently_core::error::{EventlyError, EventlyResult};
use evently_core::protocol::{Command as StoreCommand, Document};

use crate::config::EventlyConfig;
use crate::store::{EventStore, Provider};

/// `EventStore` over an external `evently-store-<name>` binary.
pub struct RemoteStore {
    provider: Provider,
}

impl RemoteStore {
    pub fn from_name(name: &str) -> Self {
        RemoteStore {
            provider: Provider::from_name(name),
        }
    }

    /// Build from the global config; requires a configured backend.
    pub fn from_config(config: &EventlyConfig) -> EventlyResult<Self> {
        let name = config.store.as_deref().ok_or_else(|| {
            EventlyError::Config("No store backend configured (set `store` in config.toml)".into())
        })?;

        Ok(RemoteStore {
            provider: Provider::from_name(name)
                .with_timeout(Duration::from_secs(config.store_timeout_secs)),
        })
    }
}

#[async_trait]
impl EventStore for RemoteStore {
    async fn query(&self, collection: &str) -> EventlyResult<Vec<Document>> {
        self.provider
            .call_with_timeout(StoreCommand::Query, json!({ "collection": collection }))
            .await
    }

    async fn set(&self, collection: &str, fields: serde_json::Value) -> EventlyResult<Document> {
        self.provider
            .call_with_timeout(
                StoreCommand::Set,
                json!({ "collection": collection, "fields": fields }),
            )
            .await
    }
}
