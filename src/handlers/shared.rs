use url::Url;

const FALLBACK_ORIGIN: &str = "http://localhost/";

/// Absolute origin (`scheme://host[:port]/`) of the incoming request.
///
/// Built from the configured scheme and the `Host` header. Anything beyond
/// scheme, host and port is discarded; an unusable host degrades to
/// `http://localhost/`.
pub fn request_origin(scheme: &str, host: Option<&str>) -> Url {
    let fallback = || Url::parse(FALLBACK_ORIGIN).expect("fallback origin is a valid URL");

    let Some(host) = host.map(str::trim).filter(|h| !h.is_empty()) else {
        return fallback();
    };

    let Ok(parsed) = Url::parse(&format!("{scheme}://{host}/")) else {
        return fallback();
    };

    let origin = parsed.origin();
    if !origin.is_tuple() {
        return fallback();
    }
    Url::parse(&format!("{}/", origin.ascii_serialization())).unwrap_or_else(|_| fallback())
}

/// Absolute URL of a host-relative asset on the request origin.
pub fn asset_url(origin: &Url, path: &str) -> Url {
    origin
        .join(path.trim_start_matches('/'))
        .unwrap_or_else(|_| origin.clone())
}
