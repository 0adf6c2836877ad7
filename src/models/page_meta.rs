use url::Url;

use crate::models::Profile;
use crate::text::{normalize, CAPTION_MAX_CHARS};

/// Social metadata embedded in the `<head>` of `GET /`.
///
/// `image_url` always points at `/og` on the requesting origin, carrying the
/// metadata-bounded caption. It does not depend on any client-side state.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub caption: String,
    pub image_url: String,
    pub page_url: String,
}

impl PageMeta {
    pub fn build(profile: &Profile, origin: &Url, raw_message: Option<&str>) -> Self {
        let caption = normalize(raw_message, CAPTION_MAX_CHARS);
        let image_url = format!(
            "{}og?t={}",
            origin.as_str(),
            urlencoding::encode(&caption)
        );

        PageMeta {
            title: format!("{} sent you a DM", profile.display_name),
            description: caption.clone(),
            caption,
            image_url,
            page_url: origin.as_str().to_string(),
        }
    }
}
