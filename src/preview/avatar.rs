use std::time::Duration;

use futures::future::BoxFuture;
use image::DynamicImage;
use reqwest::Client as ReqwestClient;
use url::Url;

use crate::error::{AppError, AppResult};

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; DmPreviewBot/1.0)";

/// Where the preview composer gets the sender's photo from.
pub trait AvatarSource: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, AppResult<DynamicImage>>;
}

/// Fetches the avatar over HTTP on every call. No caching, no retry.
pub struct HttpAvatarSource {
    client: ReqwestClient,
}

impl HttpAvatarSource {
    pub fn new() -> AppResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|_| AppError::Internal)?;
        Ok(HttpAvatarSource { client })
    }
}

impl AvatarSource for HttpAvatarSource {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, AppResult<DynamicImage>> {
        Box::pin(async move {
            let response = self.client.get(url.as_str()).send().await.map_err(|e| {
                AppError::Upstream(format!("fetching avatar {url}: {e}"))
            })?;

            if !response.status().is_success() {
                return Err(AppError::Upstream(format!(
                    "avatar {url} returned {}",
                    response.status()
                )));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| AppError::Upstream(format!("reading avatar {url}: {e}")))?;

            decode_avatar(&bytes)
        })
    }
}

/// Decode avatar bytes, refusing anything whose magic bytes are not an image.
pub fn decode_avatar(bytes: &[u8]) -> AppResult<DynamicImage> {
    match infer::get(bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {}
        Some(kind) => {
            return Err(AppError::Upstream(format!(
                "avatar is {}, not an image",
                kind.mime_type()
            )))
        }
        None => return Err(AppError::Upstream("avatar has unknown content".into())),
    }

    image::load_from_memory(bytes).map_err(|e| AppError::Upstream(format!("decoding avatar: {e}")))
}
