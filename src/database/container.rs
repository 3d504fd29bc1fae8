//! # Document Container
//!
//! یه container مجموعه‌ای از document‌های JSON هست. هر document با
//! `id` و partition key خودش پیدا میشه.
//!
//! ## عملیات‌ها
//! - `read_item`: خوندن با id و partition key (`None` یعنی پیدا نشد)
//! - `create_item`: ساخت؛ اگه وجود داشته باشه `Conflict`
//! - `upsert_item`: ساخت یا جایگزینی

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::Database;
use crate::error::{AppError, Result};

/// مسیر partition key؛ document با `id` خودش partition میشه
pub const PARTITION_KEY_PATH: &str = "/id";

// =====================================
// Document Store Trait
// =====================================
/// Interface یه document store
///
/// handler فقط این trait رو میشناسه، پس تو تست‌ها میشه mock کرد.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// خوندن یه document
    async fn read_item(&self, id: &str, partition_key: &str) -> Result<Option<Value>>;

    /// ساخت document جدید
    async fn create_item(&self, document: &Value) -> Result<()>;

    /// ساخت یا جایگزینی document
    async fn upsert_item(&self, document: &Value) -> Result<()>;
}

// =====================================
// SQLite Container
// =====================================
/// Container روی جدول `documents` در SQLite
#[derive(Debug, Clone)]
pub struct Container {
    db: Database,
    database_name: String,
    container_name: String,
}

impl Container {
    #[must_use]
    pub fn new(
        db: Database,
        database_name: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Self {
            db,
            database_name: database_name.into(),
            container_name: container_name.into(),
        }
    }

    /// استخراج id و partition key از بدنه document
    fn keys(&self, document: &Value) -> Result<(String, String)> {
        let id = document
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::InvalidDocument("missing string property 'id'".to_string()))?;

        let property = PARTITION_KEY_PATH.trim_start_matches('/');
        let partition_key = document
            .get(property)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AppError::InvalidDocument(format!(
                    "missing partition key property '{}'",
                    property
                ))
            })?;

        Ok((id.to_string(), partition_key.to_string()))
    }
}

#[async_trait]
impl DocumentStore for Container {
    async fn read_item(&self, id: &str, partition_key: &str) -> Result<Option<Value>> {
        let body = sqlx::query_scalar::<_, String>(
            r#"
            SELECT body
            FROM documents
            WHERE database_name = ? AND container_name = ?
              AND partition_key = ? AND id = ?
            "#
        )
        .bind(&self.database_name)
        .bind(&self.container_name)
        .bind(partition_key)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        body.map(|b| serde_json::from_str(&b))
            .transpose()
            .map_err(AppError::from)
    }

    async fn create_item(&self, document: &Value) -> Result<()> {
        let (id, partition_key) = self.keys(document)?;
        let body = serde_json::to_string(document)?;

        let result = sqlx::query(
            r#"
            INSERT INTO documents (database_name, container_name, partition_key, id, body, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&self.database_name)
        .bind(&self.container_name)
        .bind(&partition_key)
        .bind(&id)
        .bind(body)
        .bind(Utc::now().timestamp())
        .execute(self.db.pool())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::Conflict(
                format!("document '{}' already exists in '{}'", id, self.container_name),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert_item(&self, document: &Value) -> Result<()> {
        let (id, partition_key) = self.keys(document)?;
        let body = serde_json::to_string(document)?;

        sqlx::query(
            r#"
            INSERT INTO documents (database_name, container_name, partition_key, id, body, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (database_name, container_name, partition_key, id)
            DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at
            "#
        )
        .bind(&self.database_name)
        .bind(&self.container_name)
        .bind(&partition_key)
        .bind(&id)
        .bind(body)
        .bind(Utc::now().timestamp())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }
}
