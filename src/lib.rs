//! # View Counter Library
//!
//! یه شمارنده بازدید صفحه روی document store: هر `GET /view-counter`
//! شمارنده رو یکی زیاد میکنه و مقدار جدید رو برمیگردونه.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه - اینجا!
//! ├── main.rs         # نقطه ورود باینری
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── database/       # pool و document container
//! ├── models/         # Counter و DTO‌ها
//! ├── services/       # منطق خواندن/افزایش/نوشتن
//! └── api/            # لایه API
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use view_counter::{api::create_router, config::Config, database::Database};
//!
//! #[tokio::main]
//! async fn main() -> view_counter::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.connection_string).await?;
//!     db.migrate().await?;
//!     let _app = create_router(db, config);
//!     Ok(())
//! }
//! ```

/// ماژول مدیریت تنظیمات برنامه
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول ارتباط با document store
pub mod database;

/// ماژول مدل‌های داده
pub mod models;

/// ماژول سرویس‌ها (Business Logic)
pub mod services;

/// ماژول API و HTTP Handlers
pub mod api;

/// نتیجه عملیات با خطای سفارشی ما
pub use error::Result;

/// خطای اصلی برنامه
pub use error::AppError;

/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::database::{Container, Database, DocumentStore};
    pub use crate::error::{AppError, Result};
    pub use crate::models::*;
    pub use crate::services::*;
}
