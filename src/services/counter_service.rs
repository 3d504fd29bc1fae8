//! # Counter Service
//!
//! منطق اصلی: خواندن، افزایش، نوشتن.
//!
//! ```text
//! read_item(page-views)
//!   ├── None       -> create_item(count = 1) -> 1
//!   ├── Some(doc)  -> count + 1 -> upsert_item -> count
//!   └── Err        -> CounterRead
//! ```
//!
//! قفلی وجود نداره؛ دو request همزمان ممکنه یه مقدار رو بنویسن.

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    database::DocumentStore,
    error::{AppError, Result},
    models::{Counter, COUNTER_ID},
};

/// سرویس شمارنده بازدید
#[derive(Clone)]
pub struct CounterService {
    store: Arc<dyn DocumentStore>,
}

impl CounterService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// ثبت یک بازدید و برگردوندن شمارنده جدید
    ///
    /// # Errors
    /// - `AppError::CounterRead` اگه خواندن یا decode کردن document شکست بخوره
    /// - `AppError::CounterWrite` اگه ساخت یا upsert شکست بخوره
    pub async fn record_view(&self) -> Result<Counter> {
        let existing = self
            .store
            .read_item(COUNTER_ID, COUNTER_ID)
            .await
            .map_err(AppError::counter_read)?;

        let Some(document) = existing else {
            info!("Counter document not found, initializing at 1");
            let counter = Counter::first_view();
            let document = counter.to_document().map_err(|e| AppError::counter_write(e.into()))?;
            self.store
                .create_item(&document)
                .await
                .map_err(AppError::counter_write)?;
            return Ok(counter);
        };

        let current = Counter::from_document(document).map_err(|e| AppError::counter_read(e.into()))?;
        debug!(count = current.count, "Counter read");

        let next = current.incremented().ok_or_else(|| {
            AppError::counter_write(AppError::Internal("counter overflow".to_string()))
        })?;

        // upsert، نه replace شرطی: اگه document بین خواندن و نوشتن حذف شده باشه هم کار میکنه
        let document = next.to_document().map_err(|e| AppError::counter_write(e.into()))?;
        self.store
            .upsert_item(&document)
            .await
            .map_err(AppError::counter_write)?;

        info!(count = next.count, "View count updated");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MockDocumentStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service(store: MockDocumentStore) -> CounterService {
        CounterService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_first_view_creates_document() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read_item()
            .withf(|id, partition_key| id == "page-views" && partition_key == "page-views")
            .times(1)
            .returning(|_, _| Ok(None));
        store
            .expect_create_item()
            .withf(|doc| *doc == json!({"id": "page-views", "count": 1}))
            .times(1)
            .returning(|_| Ok(()));
        store.expect_upsert_item().never();

        let counter = service(store).record_view().await.unwrap();
        assert_eq!(counter.count, 1);
    }

    #[tokio::test]
    async fn test_existing_counter_is_incremented_and_upserted() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read_item()
            .returning(|_, _| Ok(Some(json!({"id": "page-views", "count": 41}))));
        store.expect_create_item().never();
        store
            .expect_upsert_item()
            .withf(|doc| *doc == json!({"id": "page-views", "count": 42}))
            .times(1)
            .returning(|_| Ok(()));

        let counter = service(store).record_view().await.unwrap();
        assert_eq!(counter.count, 42);
    }

    #[tokio::test]
    async fn test_read_failure_maps_to_counter_read() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read_item()
            .returning(|_, _| Err(AppError::Internal("connection refused".into())));
        store.expect_create_item().never();
        store.expect_upsert_item().never();

        let err = service(store).record_view().await.unwrap_err();
        assert!(matches!(err, AppError::CounterRead(_)));
    }

    #[tokio::test]
    async fn test_malformed_document_maps_to_counter_read() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read_item()
            .returning(|_, _| Ok(Some(json!({"id": "page-views"}))));
        store.expect_upsert_item().never();

        let err = service(store).record_view().await.unwrap_err();
        assert!(matches!(err, AppError::CounterRead(_)));
    }

    #[tokio::test]
    async fn test_upsert_failure_maps_to_counter_write() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read_item()
            .returning(|_, _| Ok(Some(json!({"id": "page-views", "count": 3}))));
        store
            .expect_upsert_item()
            .times(1)
            .returning(|_| Err(AppError::Internal("request rate too large".into())));

        let err = service(store).record_view().await.unwrap_err();
        assert!(matches!(err, AppError::CounterWrite(_)));
    }

    /// create بعد از not-found بدون retry شکست میخوره
    #[tokio::test]
    async fn test_create_conflict_maps_to_counter_write() {
        let mut store = MockDocumentStore::new();
        store.expect_read_item().times(1).returning(|_, _| Ok(None));
        store
            .expect_create_item()
            .times(1)
            .returning(|_| Err(AppError::Conflict("page-views".into())));
        store.expect_upsert_item().never();

        let err = service(store).record_view().await.unwrap_err();
        assert!(matches!(err, AppError::CounterWrite(_)));
    }

    #[tokio::test]
    async fn test_overflow_is_a_write_failure() {
        let mut store = MockDocumentStore::new();
        store
            .expect_read_item()
            .returning(|_, _| Ok(Some(json!({"id": "page-views", "count": u64::MAX}))));
        store.expect_upsert_item().never();

        let err = service(store).record_view().await.unwrap_err();
        assert!(matches!(err, AppError::CounterWrite(_)));
    }
}
