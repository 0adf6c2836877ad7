// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    handler::HandlerWithoutStateExt,
    http::{header, HeaderMap, Method, Request, StatusCode},
    routing::get,
    Router,
};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use image::{DynamicImage, Rgba, RgbaImage};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use url::Url;

use dm_preview_server::{
    error::{AppError, AppResult},
    handlers,
    models::DEFAULT_PROFILE,
    preview::{AvatarSource, FontCache},
    state::AppState,
};

pub const TEST_HOST: &str = "dm.test:8080";

/// Font files commonly present on CI images. `PREVIEW_TEST_FONT` wins.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Locate a TrueType font for rendering tests, or `None` when the machine
/// has none. Tests that need one skip themselves in that case.
pub fn test_font_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("PREVIEW_TEST_FONT") {
        return Some(PathBuf::from(path));
    }
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// 40×30 two-tone avatar so crop and scale paths are exercised.
pub fn test_avatar() -> DynamicImage {
    let mut img = RgbaImage::from_pixel(40, 30, Rgba([200, 40, 40, 255]));
    for y in 0..30 {
        for x in 0..20 {
            img.put_pixel(x, y, Rgba([40, 40, 200, 255]));
        }
    }
    DynamicImage::ImageRgba8(img)
}

// ── Avatar sources ───────────────────────────────────────────────────────────

/// Serves a fixed image and records every URL it was asked for.
pub struct StaticAvatarSource {
    image: DynamicImage,
    pub requested: Mutex<Vec<String>>,
}

impl StaticAvatarSource {
    pub fn new(image: DynamicImage) -> Self {
        StaticAvatarSource {
            image,
            requested: Mutex::new(Vec::new()),
        }
    }
}

impl AvatarSource for StaticAvatarSource {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, AppResult<DynamicImage>> {
        self.requested.lock().unwrap().push(url.to_string());
        let image = self.image.clone();
        Box::pin(async move { Ok(image) })
    }
}

/// Always fails, like an unreachable upstream.
pub struct FailingAvatarSource;

impl AvatarSource for FailingAvatarSource {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, AppResult<DynamicImage>> {
        Box::pin(async move { Err(AppError::Upstream(format!("connection refused: {url}"))) })
    }
}

// ── App construction ─────────────────────────────────────────────────────────

pub fn test_state(avatars: Arc<dyn AvatarSource>, font_path: PathBuf) -> AppState {
    AppState {
        profile: DEFAULT_PROFILE,
        public_scheme: Arc::from("http"),
        avatar_path: Arc::from("/avatar.jpg"),
        avatars,
        fonts: Arc::new(FontCache::new(font_path)),
    }
}

/// Build the application router around the given state.
pub fn create_test_app(state: AppState) -> Router {
    let assets = ServeDir::new(std::env::temp_dir().join("dm_preview_test_public"))
        .not_found_service(handlers::not_found.into_service());
    Router::new()
        .route("/", get(handlers::page::home))
        .route("/og", get(handlers::og::preview_image))
        .route("/health", get(handlers::health_check))
        .fallback_service(assets)
        .with_state(state)
}

/// App with a static avatar and whatever font the machine provides (or a
/// nonexistent path when there is none).
pub fn default_test_app() -> Router {
    let font = test_font_path().unwrap_or_else(|| PathBuf::from("/nonexistent/font.ttf"));
    create_test_app(test_state(
        Arc::new(StaticAvatarSource::new(test_avatar())),
        font,
    ))
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, bytes) = get_raw(app, uri).await;
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let (status, _, bytes) = get_raw(app, uri).await;
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::HOST, TEST_HOST)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn get_without_host(app: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes)
}
