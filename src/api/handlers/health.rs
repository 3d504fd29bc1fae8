//! # Health Check Handler
//!
//! برای بررسی سلامت سرویس

use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use crate::{models::HealthResponse, services::AppState};

// =====================================
// Health Check
// =====================================
/// بررسی سلامت سرویس و اتصال store
///
/// # Endpoint
/// `GET /health`
///
/// # Response
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": true
/// }
/// ```
/// اگه store جواب نده، 503 با `"status": "degraded"`.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = match state.database.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };

    let response = HealthResponse::new(db_ok);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
