mod page_meta;

pub use page_meta::PageMeta;

use serde::Deserialize;

// ============================================================================
// Profile
// ============================================================================

/// The simulated sender. Immutable template, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Profile {
    pub display_name: &'static str,
    pub handle: &'static str,
    pub bio: &'static str,
    pub followers: u64,
    pub message: &'static str,
    pub time: &'static str,
}

pub const DEFAULT_PROFILE: Profile = Profile {
    display_name: "Nikita Bier",
    handle: "@nikitabier",
    bio: "head of product @x, advisor @solana, venture partner @lightspeedvp, \
          ex-founder @gasappteam (acq by discord), ex-founder @thetbhapp (acq by facebook)",
    followers: 599_300,
    message: crate::text::FALLBACK_MESSAGE,
    time: "11:25",
};

impl Profile {
    pub fn first_name(&self) -> &'static str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(self.display_name)
    }

    /// Caption rendered under the chat bubble in the preview image.
    pub fn tagline(&self) -> String {
        format!("Did {} just message you? Yes.", self.first_name())
    }
}

// ============================================================================
// Query parameters
// ============================================================================

/// `GET /og?t=<text>`
#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub t: Option<String>,
}

/// `GET /?t=&bio=&followers=&time=`; every field falls back to the profile.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub t: Option<String>,
    pub bio: Option<String>,
    pub followers: Option<String>,
    pub time: Option<String>,
}
