use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Profile, DEFAULT_PROFILE};
use crate::preview::{AvatarSource, FontCache, HttpAvatarSource};

/// Shared application state passed to all handlers.
///
/// Everything here is read-only after startup; the font cache is filled
/// lazily on the first preview request.
#[derive(Clone)]
pub struct AppState {
    pub profile: Profile,
    pub public_scheme: Arc<str>,
    pub avatar_path: Arc<str>,
    pub avatars: Arc<dyn AvatarSource>,
    pub fonts: Arc<FontCache>,
}

impl AppState {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(AppState {
            profile: DEFAULT_PROFILE,
            public_scheme: Arc::from(config.public_scheme.as_str()),
            avatar_path: Arc::from(config.avatar_path.as_str()),
            avatars: Arc::new(HttpAvatarSource::new()?),
            fonts: Arc::new(FontCache::new(config.font_path.clone())),
        })
    }
}
