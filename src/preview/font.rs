use std::path::PathBuf;
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Process-lifetime slot for the display font.
///
/// The file is read and parsed on first use and shared read-only afterwards.
/// A failed load leaves the slot empty, so a later request tries again.
pub struct FontCache {
    path: PathBuf,
    font: OnceCell<Arc<Font>>,
}

impl FontCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FontCache {
            path: path.into(),
            font: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.font.initialized()
    }

    pub async fn get(&self) -> AppResult<Arc<Font>> {
        self.font
            .get_or_try_init(|| async {
                let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
                    AppError::Render(format!("reading font {}: {e}", self.path.display()))
                })?;
                let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| {
                    AppError::Render(format!("parsing font {}: {e}", self.path.display()))
                })?;
                info!("🔤 Font loaded from {}", self.path.display());
                Ok::<_, AppError>(Arc::new(font))
            })
            .await
            .cloned()
    }
}
