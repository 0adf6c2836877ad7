use axum::{
    body::Body,
    extract::{Host, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use bytes::Bytes;
use tracing::debug;

use super::shared::{asset_url, request_origin};
use crate::{
    error::{AppError, AppResult},
    models::PreviewQuery,
    preview::{encode_png, PreviewComposer},
    state::AppState,
    text::{normalize, IMAGE_MAX_CHARS},
};

const CACHE_CONTROL: &str = "public, immutable, no-transform, max-age=31536000";

/// GET /og?t=<text>
///
/// Renders the 1200×630 social preview card on demand. The caption is
/// normalized here with the image bound, independently of the page metadata.
/// Avatar or font failures fail the whole request; there is no fallback image.
pub async fn preview_image(
    State(state): State<AppState>,
    host: Option<Host>,
    query: Option<Query<PreviewQuery>>,
) -> AppResult<Response> {
    let raw = query.and_then(|Query(q)| q.t);
    let message = normalize(raw.as_deref(), IMAGE_MAX_CHARS);

    let origin = request_origin(
        &state.public_scheme,
        host.as_ref().map(|Host(h)| h.as_str()),
    );
    let avatar_url = asset_url(&origin, &state.avatar_path);
    debug!(%avatar_url, chars = message.chars().count(), "Rendering preview image");

    let avatar = state.avatars.fetch(&avatar_url).await?;
    let font = state.fonts.get().await?;
    let profile = state.profile;

    let png = tokio::task::spawn_blocking(move || {
        let composer = PreviewComposer::new(font, &profile);
        encode_png(&composer.render(&message, &avatar))
    })
    .await
    .map_err(|e| AppError::Render(format!("render task failed: {e}")))??;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .header(header::CACHE_CONTROL, CACHE_CONTROL)
        .body(Body::from(Bytes::from(png)))
        .map_err(|_| AppError::Internal)
}
