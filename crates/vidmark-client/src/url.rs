//! Timestamped link composition for known video-sharing domains.

/// Appends a `t=<seconds>s` query parameter to YouTube-family URLs so the
/// link opens at the marker's offset. Any other URL passes through
/// unchanged. An existing query string is respected (`&` instead of `?`).
pub fn timestamped_url(url: &str, seconds: i64) -> String {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}t={seconds}s")
    } else {
        url.to_string()
    }
}
