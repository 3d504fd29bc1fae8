//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! ```text
//! ┌─────────────────┐
//! │    API Layer    │  <-- HTTP handlers (axum)
//! ├─────────────────┤
//! │  Service Layer  │  <-- CounterService (اینجا!)
//! ├─────────────────┤
//! │ Document Store  │  <-- Container
//! ├─────────────────┤
//! │    Database     │  <-- SQLite pool
//! └─────────────────┘
//! ```

mod counter_service;

pub use counter_service::*;

use std::sync::Arc;
use crate::{
    config::Config,
    database::{Database, DocumentStore},
};

// =====================================
// Application State
// =====================================
/// وضعیت برنامه که بین همه handlers اشتراک‌گذاری میشه
///
/// تنها state مشترک، اتصال دیتابیس هست؛ شمارنده در حافظه نگه داشته نمیشه.
#[derive(Clone)]
pub struct AppState {
    /// تنظیمات برنامه
    pub config: Arc<Config>,

    /// اتصال دیتابیس، برای health check
    pub database: Database,

    /// سرویس شمارنده
    pub counter_service: Arc<CounterService>,
}

impl AppState {
    /// ساخت AppState روی container تعریف شده در تنظیمات
    #[must_use]
    pub fn new(db: Database, config: Config) -> Self {
        let container = db.container(&config.database_name, &config.container_name);
        Self::with_store(db, config, Arc::new(container))
    }

    /// ساخت AppState با یه store دلخواه (مثلا mock در تست‌ها)
    #[must_use]
    pub fn with_store(db: Database, config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: Arc::new(config),
            database: db,
            counter_service: Arc::new(CounterService::new(store)),
        }
    }
}
