//! # ماژول مدیریت خطاها (Error Handling)
//!
//! این ماژول سیستم مدیریت خطای سرویس شمارنده رو تعریف میکنه.
//!
//! ## مفاهیم Rust:
//! - **thiserror**: derive macro برای Error trait
//! - **From Trait**: تبدیل خودکار خطاهای کتابخانه‌ها با `#[from]`
//! - **Result Type Alias**: alias برای ساده‌تر شدن کد
//! - **IntoResponse**: تبدیل خطا به پاسخ HTTP
//!
//! ## قانون اصلی
//! جزئیات خطای داخلی فقط لاگ میشه؛ کلاینت فقط یه پیام ثابت مثل
//! `{"error": "Database error"}` میبینه.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

// =====================================
// Result Type Alias
// =====================================
/// نوع Result سفارشی برنامه
///
/// به جای نوشتن `Result<Counter, AppError>` میتونیم بنویسیم `Result<Counter>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// پیام عمومی برای خطای خواندن شمارنده
pub const READ_FAILED_MESSAGE: &str = "Database error";

/// پیام عمومی برای خطای ذخیره شمارنده
pub const WRITE_FAILED_MESSAGE: &str = "Failed to save count";

// =====================================
// Custom Error Enum
// =====================================
/// خطای اصلی برنامه
///
/// # مفاهیم:
/// - `#[error("...")]`: پیام خطا برای لاگ (نه برای کلاینت)
/// - `#[source]`: نگه داشتن علت اصلی خطا
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای سطح handler
    // ----------------------------------------

    /// خواندن شمارنده از store شکست خورد
    #[error("Failed to read counter: {0}")]
    CounterRead(#[source] Box<AppError>),

    /// نوشتن شمارنده در store شکست خورد
    #[error("Failed to write counter: {0}")]
    CounterWrite(#[source] Box<AppError>),

    // ----------------------------------------
    // خطاهای store
    // ----------------------------------------

    /// document با همین id و partition key از قبل وجود داره
    #[error("Conflict: {0}")]
    Conflict(String),

    /// document فاقد id یا partition key هست
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// خطای داخلی
    #[error("Internal server error: {0}")]
    Internal(String),

    // ----------------------------------------
    // خطاهای راه‌اندازی
    // ----------------------------------------

    /// خطای سرور HTTP
    #[error("Server error: {0}")]
    Server(String),

    /// خطای تنظیمات
    #[error("Configuration error: {0}")]
    Config(String),

    // ----------------------------------------
    // خطاهای تبدیل شده از کتابخانه‌ها
    // ----------------------------------------

    /// خطای دیتابیس
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// خطای migration
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// خطای IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// خطای JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// wrap کردن یه خطا به عنوان شکست خواندن شمارنده
    #[must_use]
    pub fn counter_read(err: AppError) -> Self {
        Self::CounterRead(Box::new(err))
    }

    /// wrap کردن یه خطا به عنوان شکست نوشتن شمارنده
    #[must_use]
    pub fn counter_write(err: AppError) -> Self {
        Self::CounterWrite(Box::new(err))
    }

    /// گرفتن HTTP status code متناسب با خطا
    ///
    /// همه خطاهای این سرویس سمت سرور هستن؛ کلاینت ورودی نمیفرسته.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// پیامی که به کلاینت نشون داده میشه
    ///
    /// متن خطای داخلی هیچوقت اینجا نمیاد.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::CounterRead(_) => READ_FAILED_MESSAGE,
            Self::CounterWrite(_) => WRITE_FAILED_MESSAGE,
            _ => "Internal server error",
        }
    }
}

// =====================================
// Error Response DTO
// =====================================
/// ساختار پاسخ خطا در API
///
/// ```json
/// { "error": "Database error" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// ساخت پاسخ خطای جدید
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// =====================================
// IntoResponse Implementation
// =====================================
/// تبدیل AppError به Response HTTP
///
/// خطای کامل (با علت) لاگ میشه، ولی بدنه پاسخ فقط پیام عمومی رو داره.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Server error occurred");

        let status = self.status_code();
        let body = ErrorResponse::new(self.public_message());

        (status, Json(body)).into_response()
    }
}
