//! The calendar service: month loading and event creation.
//!
//! Owns the shared agenda state. The rendering layer calls `load_month`
//! whenever a month becomes visible (initial mount, month swipes) and
//! reads `days`/`loading` snapshots; it never mutates state directly.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use evently_core::agenda::{aggregate_month, Days};
use evently_core::error::{EventlyError, EventlyResult, Signal};
use evently_core::event::EventDraft;
use evently_core::month::VisibleMonth;

use crate::net::{AlwaysOnline, NetworkStatus};
use crate::state::AgendaState;
use crate::store::{decode_events, EventStore};

const EVENTS_COLLECTION: &str = "events";

pub struct Calendar<S: EventStore> {
    store: Arc<S>,
    net: Arc<dyn NetworkStatus>,
    state: Arc<RwLock<AgendaState>>,
    collection: String,
}

impl<S: EventStore> Calendar<S> {
    pub fn new(store: Arc<S>) -> Self {
        Calendar {
            store,
            net: Arc::new(AlwaysOnline),
            state: Arc::new(RwLock::new(AgendaState::new())),
            collection: EVENTS_COLLECTION.to_string(),
        }
    }

    /// Use a real reachability source instead of `AlwaysOnline`.
    pub fn with_network_status(mut self, net: Arc<dyn NetworkStatus>) -> Self {
        self.net = net;
        self
    }

    pub fn with_collection(mut self, collection: &str) -> Self {
        self.collection = collection.to_string();
        self
    }

    /// Load one visible month into the agenda: fetch the collection,
    /// filter to the month, bucket by day, order each day, merge.
    ///
    /// Overlapping loads of the same month are last-request-wins: a
    /// completion that is no longer the newest is discarded. Failures
    /// leave prior agenda state untouched.
    pub async fn load_month(&self, month: VisibleMonth) -> EventlyResult<()> {
        let generation = self.state.write().await.begin_load(month);
        debug!(%month, generation, "loading agenda month");

        let result = self.fetch_month(month).await;

        let mut state = self.state.write().await;
        state.finish_load();

        match result {
            Ok(days) => {
                if state.is_current(month, generation) {
                    state.merge_month(month, days);
                } else {
                    debug!(%month, generation, "discarding stale month load");
                }
                Ok(())
            }
            Err(err) => Err(self.classify(err)),
        }
    }

    async fn fetch_month(&self, month: VisibleMonth) -> EventlyResult<Days> {
        let documents = self.store.query(&self.collection).await?;
        let events = decode_events(documents);
        Ok(aggregate_month(events, month))
    }

    /// Write a new event to the store. The store assigns the id; it
    /// shows up in the agenda on the next load of its month. Resolves
    /// the created-success signal pair, as the UI toasts expect.
    pub async fn create_event(&self, draft: EventDraft) -> EventlyResult<Signal> {
        let fields = serde_json::to_value(&draft)
            .map_err(|e| EventlyError::Serialization(e.to_string()))?;

        match self.store.set(&self.collection, fields).await {
            Ok(document) => {
                debug!(id = %document.id, "created event");
                Ok(Signal::created())
            }
            Err(err) => Err(self.classify(err)),
        }
    }

    /// Snapshot of the day-keyed agenda buckets.
    pub async fn days(&self) -> Days {
        self.state.read().await.days().clone()
    }

    /// Whether any month load is in flight.
    pub async fn loading(&self) -> bool {
        self.state.read().await.loading()
    }

    /// A store failure while the device is offline is a connectivity
    /// error, whatever the store reported.
    fn classify(&self, err: EventlyError) -> EventlyError {
        match err {
            EventlyError::Store { .. }
            | EventlyError::StoreTimeout(_)
            | EventlyError::StoreNotInstalled(_)
                if !self.net.is_connected() =>
            {
                EventlyError::Connection
            }
            other => other,
        }
    }
}
