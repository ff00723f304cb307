//! Read-only dumps of the catalog-style collections. No pagination, filtering or ordering.

use crate::domain::model::Subscription;
use crate::storage::DocumentStore;
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Clone)]
pub struct ListingService {
    store: Arc<DocumentStore>,
}

impl ListingService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn marketplace(&self) -> Vec<JsonValue> {
        self.store.load().await.marketplace
    }

    pub async fn tasks(&self) -> Vec<JsonValue> {
        self.store.load().await.tasks
    }

    pub async fn leaderboard(&self) -> Vec<JsonValue> {
        self.store.load().await.leaderboard
    }

    pub async fn subscriptions(&self) -> Vec<Subscription> {
        self.store.load().await.subscriptions
    }
}
