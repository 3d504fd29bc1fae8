//! # ماژول دیتابیس (Database Layer)
//!
//! این ماژول اتصال به document store رو مدیریت میکنه.
//!
//! ## ساختار
//! ```text
//! Database (connection pool)
//!   └── Container (database_name + container_name)
//!         └── Document (JSON با id و partition key)
//! ```
//!
//! ## چرخه عمر اتصال
//! - Pool یک بار در شروع برنامه ساخته میشه
//! - در `AppState` بین همه request‌ها share میشه
//! - بعد از graceful shutdown با `close()` بسته میشه

mod container;

pub use container::*;

use std::sync::Arc;
use std::time::Duration;
use sqlx::{sqlite::{SqlitePool, SqlitePoolOptions}, migrate::Migrator};
use tracing::info;
use crate::error::Result;

// مسیر migration‌ها
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

// =====================================
// Database Connection
// =====================================
/// اتصال به store با Connection Pool
///
/// `Arc` اجازه میده یه pool بین همه handlers share بشه؛
/// هر clone فقط شمارنده reference رو زیاد میکنه.
#[derive(Debug, Clone)]
pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    /// اتصال به store
    ///
    /// # Arguments
    /// * `connection_string` - آدرس store (مثلا `sqlite://data/counter.db?mode=rwc`)
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اتصال موفق نباشه
    pub async fn connect(connection_string: impl AsRef<str>) -> Result<Self> {
        let url = connection_string.as_ref();

        // ساخت پوشه فایل دیتابیس اگه وجود نداره
        if let Some(path) = url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .connect(url)
            .await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// ساخت store در حافظه، برای تست‌ها و اجرای محلی
    ///
    /// فقط یک اتصال، چون هر اتصال `:memory:` دیتابیس جدای خودش رو داره.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let db = Self {
            pool: Arc::new(pool),
        };

        db.migrate().await?;
        Ok(db)
    }

    /// اجرای migration‌ها (ساخت جدول documents اگه نباشه)
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&*self.pool).await?;
        Ok(())
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// گرفتن یه container داخل یه دیتابیس منطقی
    #[must_use]
    pub fn container(
        &self,
        database_name: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Container {
        Container::new(self.clone(), database_name, container_name)
    }

    /// بررسی سلامت store
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }

    /// بستن همه اتصال‌ها
    ///
    /// بعد از این، هر query خطا برمیگردونه.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_health_check() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_health_check_fails_after_close() {
        let db = Database::in_memory().await.unwrap();
        db.close().await;
        assert!(db.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.migrate().await.is_ok());
    }
}
