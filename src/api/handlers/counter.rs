//! # Counter Handler
//!
//! Handler شمارنده بازدید صفحه

use axum::{extract::State, Json};
use tracing::info;

use crate::{
    error::Result,
    models::CountResponse,
    services::AppState,
};

// =====================================
// View Counter
// =====================================
/// ثبت یک بازدید و برگردوندن شمارنده جدید
///
/// # Endpoint
/// `GET /view-counter` (و `GET /api/view-counter`)
///
/// # Response
/// - 200: `{"count": 42}`
/// - 500: `{"error": "Database error"}` یا `{"error": "Failed to save count"}`
pub async fn view_counter(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    info!("view_counter triggered");

    let counter = state.counter_service.record_view().await?;

    Ok(Json(CountResponse::from(&counter)))
}
