use crate::app::ServiceError;
use crate::storage::DocumentStore;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<DocumentStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }

    /// Bumps the persisted visit counter and returns the new total.
    pub async fn record_visit(&self) -> Result<u64, ServiceError> {
        let visits = self
            .store
            .update(|doc| {
                doc.analytics.visits = doc.analytics.visits.saturating_add(1);
                Ok::<_, ServiceError>(doc.analytics.visits)
            })
            .await?;
        debug!(visits, "status visit recorded");
        Ok(visits)
    }
}
