//! # Middleware
//!
//! Middleware‌های سفارشی برای پردازش request/response

use axum::{
    body::Body,
    http::{header::HeaderValue, Request},
    middleware::Next,
    response::Response,
};
/// نام header شناسه request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =====================================
// Request ID Middleware
// =====================================
/// اضافه کردن Request ID به هر request
///
/// اگه کلاینت `X-Request-Id` فرستاده باشه همون برمیگرده،
/// وگرنه یه ID جدید ساخته میشه.
///
/// # استفاده:
/// ```rust,ignore
/// let app = Router::new()
///     .layer(axum::middleware::from_fn(request_id));
/// ```
pub async fn request_id(mut request: Request<Body>, next: Next) -> Response {
    let header_value = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .cloned()
        .or_else(|| HeaderValue::from_str(&super::generate_request_id()).ok());

    if let Some(value) = &header_value {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
