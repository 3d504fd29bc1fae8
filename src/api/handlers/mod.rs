//! # HTTP Handlers
//!
//! - `counter`: شمارنده بازدید صفحه
//! - `health`: بررسی سلامت سرویس

pub mod counter;
pub mod health;
