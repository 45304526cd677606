pub(crate) mod http;
pub mod image;
pub(crate) mod sse;

/// Strip a trailing slash so URL joins never produce `//`.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
