pub mod og;
pub mod page;
pub mod shared;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "dm-preview-server",
            "version": env!("CARGO_PKG_VERSION"),
            "font": if state.fonts.is_loaded() { "loaded" } else { "pending" },
        })),
    )
}

/// Fallback for paths that are neither routes nor static assets.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}
