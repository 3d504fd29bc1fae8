//! # لایه API
//!
//! این ماژول HTTP handlers و routing رو مدیریت میکنه.
//!
//! ## ساختار URL‌ها:
//! - `GET /view-counter` - ثبت بازدید و گرفتن شمارنده
//! - `GET /api/view-counter` - همون، با prefix پلتفرم میزبان
//! - `GET /health` - Health check

mod handlers;
mod middleware;

pub use handlers::*;
pub use middleware::*;

use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    database::Database,
    services::AppState,
};

// =====================================
// Router Builder
// =====================================
/// ساخت Router اصلی برنامه
///
/// # Arguments
/// * `db` - اتصال دیتابیس (یک بار برای کل process)
/// * `config` - تنظیمات برنامه
pub fn create_router(db: Database, config: Config) -> Router {
    router(AppState::new(db, config))
}

/// ساخت Router روی یه state آماده
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/view-counter", get(handlers::counter::view_counter))
        .nest("/api", api_routes())
        .route("/health", get(handlers::health::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::request_id))
                // صفحه استاتیک روی دامنه دیگه‌ای fetch میکنه
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET])
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Route‌های API
fn api_routes() -> Router<AppState> {
    Router::new().route("/view-counter", get(handlers::counter::view_counter))
}

/// تولید request ID برای tracing
#[must_use]
pub fn generate_request_id() -> String {
    nanoid::nanoid!(12)
}
