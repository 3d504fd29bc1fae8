//! # ماژول مدل‌ها (Domain Models)
//!
//! - **Entity**: `Counter`، همون document ذخیره شده در store
//! - **DTO**: `CountResponse` و `HealthResponse` برای پاسخ‌های API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// شناسه ثابت تنها شمارنده سیستم (هم id و هم partition key)
pub const COUNTER_ID: &str = "page-views";

// =====================================
// Counter Entity
// =====================================
/// Document شمارنده
///
/// ```json
/// { "id": "page-views", "count": 42 }
/// ```
///
/// فیلدهای اضافه‌ای که ابزار دیگه‌ای روی document نوشته باشه در `extra`
/// نگه داشته میشن و موقع upsert دست نخورده برمیگردن.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    pub id: String,

    pub count: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Counter {
    /// شمارنده تازه برای اولین بازدید
    #[must_use]
    pub fn first_view() -> Self {
        Self {
            id: COUNTER_ID.to_string(),
            count: 1,
            extra: Map::new(),
        }
    }

    /// شمارنده بعدی؛ `None` اگه سرریز بشه
    #[must_use]
    pub fn incremented(mut self) -> Option<Self> {
        self.count = self.count.checked_add(1)?;
        Some(self)
    }

    /// تبدیل از document خام
    pub fn from_document(document: Value) -> serde_json::Result<Self> {
        serde_json::from_value(document)
    }

    /// تبدیل به document خام برای ذخیره
    pub fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

// =====================================
// DTOs
// =====================================
/// پاسخ موفق endpoint شمارنده
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

impl From<&Counter> for CountResponse {
    fn from(counter: &Counter) -> Self {
        Self {
            count: counter.count,
        }
    }
}

/// پاسخ health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: bool,
}

impl HealthResponse {
    #[must_use]
    pub fn new(database: bool) -> Self {
        Self {
            status: if database { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
        }
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.database
    }
}
