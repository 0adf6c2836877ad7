use askama::Template;
use axum::{
    extract::{Host, Query, RawQuery, State},
    response::Html,
};

use super::shared::{asset_url, request_origin};
use crate::{
    error::AppResult,
    models::{PageMeta, PageQuery, Profile},
    state::AppState,
    text::{
        bio_segments, format_followers, format_time, normalize, sanitize_followers, share_url,
        BioSegment, MESSAGE_MAX_CHARS,
    },
};

/// Shown in the bubble while the message field is blank.
const EMPTY_MESSAGE_HINT: &str = "(Your DM preview will update as you type.)";
const EMPTY_BIO_HINT: &str = "Add a bio below to include it in the preview.";

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub meta: PageMeta,
    pub profile: Profile,
    pub avatar_url: String,
    pub message: String,
    pub empty_message_hint: &'static str,
    pub bio: String,
    pub bio_segments: Vec<BioSegment>,
    pub empty_bio_hint: &'static str,
    pub followers_input: String,
    pub followers_display: String,
    pub time_input: String,
    pub time_display: String,
    pub share_url: String,
}

impl HomeTemplate {
    pub fn build(
        profile: Profile,
        origin: &url::Url,
        avatar_path: &str,
        query: PageQuery,
        raw_query: Option<&str>,
    ) -> Self {
        let meta = PageMeta::build(&profile, origin, query.t.as_deref());

        // A blank `t` falls back to the profile's default message.
        let message = normalize(query.t.as_deref(), MESSAGE_MAX_CHARS);

        let bio = query.bio.unwrap_or_else(|| profile.bio.to_string());
        let followers_input = query
            .followers
            .unwrap_or_else(|| profile.followers.to_string());
        let time_input = query.time.unwrap_or_else(|| profile.time.to_string());

        let mut page_url = origin.clone();
        page_url.set_query(raw_query.filter(|q| !q.is_empty()));
        let share = share_url(&page_url, &message);

        HomeTemplate {
            avatar_url: asset_url(origin, avatar_path).to_string(),
            bio_segments: bio_segments(&bio),
            followers_display: format_followers(sanitize_followers(&followers_input)),
            time_display: format_time(&time_input),
            share_url: share.to_string(),
            empty_message_hint: EMPTY_MESSAGE_HINT,
            empty_bio_hint: EMPTY_BIO_HINT,
            meta,
            profile,
            message,
            bio,
            followers_input,
            time_input,
        }
    }

    pub fn bio_is_blank(&self) -> bool {
        self.bio.trim().is_empty()
    }
}

/// GET /?t=&bio=&followers=&time=
///
/// Renders the mock-up page. Unparsable query strings are treated as empty.
pub async fn home(
    State(state): State<AppState>,
    host: Option<Host>,
    query: Option<Query<PageQuery>>,
    RawQuery(raw_query): RawQuery,
) -> AppResult<Html<String>> {
    let origin = request_origin(
        &state.public_scheme,
        host.as_ref().map(|Host(h)| h.as_str()),
    );
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let page = HomeTemplate::build(
        state.profile,
        &origin,
        &state.avatar_path,
        query,
        raw_query.as_deref(),
    );
    Ok(Html(page.render()?))
}
