//! Redirect target preparation.

/// Returns a redirect-ready URL, prepending `https://` when the stored URL
/// carries neither an `http://` nor an `https://` prefix.
///
/// Stored URLs are accepted scheme-less (e.g. `example.com`), but a
/// Location header without a scheme would be treated as a relative path by
/// the browser.
pub fn ensure_scheme(original_url: &str) -> String {
    if original_url.starts_with("http://") || original_url.starts_with("https://") {
        original_url.to_string()
    } else {
        format!("https://{original_url}")
    }
}
