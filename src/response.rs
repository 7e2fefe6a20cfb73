//! Response helpers: JSON with status, or plain-text confirmations.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 200 with a `text/plain` body.
pub fn confirmation(text: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::OK, text.into())
}
