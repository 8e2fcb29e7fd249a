use url::Url;

/// Returns `true` for media URLs the app can load: absolute http(s) or local file URIs.
pub fn is_valid_media_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "file"),
        Err(_) => false,
    }
}
