//! HTTP request handlers for the mock server.

pub mod repos;
pub mod users;

pub use repos::*;
pub use users::*;

use axum::{http::StatusCode, response::IntoResponse, Json};

/// The v2 API's not-found body.
pub(crate) fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
        .into_response()
}

/// Answer for privileged endpoints hit without credentials.
pub(crate) fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": "not authorized" })),
    )
        .into_response()
}
