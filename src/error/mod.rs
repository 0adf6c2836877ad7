use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Font loading, composition, or encoding failed.
    #[error("Render error: {0}")]
    Render(String),

    /// The avatar could not be fetched or decoded.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::Render(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            AppError::Render(detail) => {
                tracing::error!(%detail, "Preview render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render preview image".into(),
                )
            }
            AppError::Upstream(detail) => {
                tracing::warn!(%detail, "Upstream asset fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render preview image".into(),
                )
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => {
                tracing::error!("Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
