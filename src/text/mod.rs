use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Shown whenever the incoming text is absent or blank.
pub const FALLBACK_MESSAGE: &str = "Come work for X";

/// Bound for the caption embedded in page metadata.
pub const CAPTION_MAX_CHARS: usize = 50;

/// Bound for the caption baked into the preview image.
pub const IMAGE_MAX_CHARS: usize = 100;

/// Bound for the message shown in the interactive mock-up.
pub const MESSAGE_MAX_CHARS: usize = 1000;

const ELLIPSIS: &str = "...";

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").unwrap());

static HANDLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(@[A-Za-z0-9_.-]+)(.*)$").unwrap());

// ── Normalization ──────────────────────────────────────────────────────────

/// Trim `raw` and bound it to `max_chars` characters.
///
/// Blank or missing input yields [`FALLBACK_MESSAGE`]. Longer input is cut at
/// `max_chars`, stripped of trailing whitespace, and suffixed with `...`.
pub fn normalize(raw: Option<&str>, max_chars: usize) -> String {
    let text = raw.unwrap_or_default().trim_matches(is_blank);
    if text.is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }

    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", text[..cut].trim_end_matches(is_blank)),
    }
}

// Byte-order marks count as blank too.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

// ── Mock-up formatters ─────────────────────────────────────────────────────

/// Render an `HH:MM` value on a 12-hour clock ("13:00" → "1:00 PM").
///
/// Values that are not `HH:MM` pass through unchanged; an empty value renders
/// as `--:--`.
pub fn format_time(value: &str) -> String {
    if !TIME_PATTERN.is_match(value) {
        return if value.is_empty() {
            "--:--".to_string()
        } else {
            value.to_string()
        };
    }

    let Some((hours, minutes)) = value.split_once(':') else {
        return value.to_string();
    };
    let hours: u32 = hours.parse().unwrap_or_default();
    let minutes: u32 = minutes.parse().unwrap_or_default();

    let normalized_hours = ((hours + 11) % 12) + 1;
    let suffix = if hours >= 12 { "PM" } else { "AM" };

    format!("{normalized_hours}:{minutes:02} {suffix}")
}

/// Keep only the digits of a free-form follower count.
pub fn sanitize_followers(value: &str) -> u64 {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

/// 599300 → "599K"; 1234 → "1,234".
pub fn format_followers(count: u64) -> String {
    if count >= 100_000 {
        return format!("{}K", count / 1000 + u64::from(count % 1000 >= 500));
    }

    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Bio highlighting ───────────────────────────────────────────────────────

/// One piece of a bio, split on whitespace runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BioSegment {
    Whitespace(String),
    Text(String),
    Handle { handle: String, rest: String },
}

impl BioSegment {
    pub fn is_handle(&self) -> bool {
        matches!(self, BioSegment::Handle { .. })
    }

    /// The `@handle` part, empty for non-handle segments.
    pub fn handle(&self) -> &str {
        match self {
            BioSegment::Handle { handle, .. } => handle,
            _ => "",
        }
    }

    /// Text following the handle, or the whole segment otherwise.
    pub fn rest(&self) -> &str {
        match self {
            BioSegment::Handle { rest, .. } => rest,
            BioSegment::Whitespace(s) | BioSegment::Text(s) => s,
        }
    }
}

/// Split `bio` into segments, marking tokens that start with an `@handle`.
pub fn bio_segments(bio: &str) -> Vec<BioSegment> {
    let mut segments = Vec::new();
    let mut token = String::new();
    let mut in_space = false;

    for ch in bio.chars() {
        if ch.is_whitespace() != in_space && !token.is_empty() {
            segments.push(classify(std::mem::take(&mut token), in_space));
        }
        in_space = ch.is_whitespace();
        token.push(ch);
    }
    if !token.is_empty() {
        segments.push(classify(token, in_space));
    }
    segments
}

fn classify(token: String, whitespace: bool) -> BioSegment {
    if whitespace {
        return BioSegment::Whitespace(token);
    }
    match HANDLE_PATTERN.captures(&token) {
        Some(caps) => BioSegment::Handle {
            handle: caps[1].to_string(),
            rest: caps[2].to_string(),
        },
        None => BioSegment::Text(token),
    }
}

// ── Share link ─────────────────────────────────────────────────────────────

/// The "copy link" target: `page_url` with `t` set to `message`, or with `t`
/// removed when the message is blank.
pub fn share_url(page_url: &Url, message: &str) -> Url {
    let mut url = page_url.clone();
    let kept: Vec<(String, String)> = page_url
        .query_pairs()
        .filter(|(k, _)| k != "t")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.set_query(None);
    if kept.is_empty() && message.trim().is_empty() {
        return url;
    }

    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        if !message.trim().is_empty() {
            pairs.append_pair("t", message);
        }
    }
    url
}
