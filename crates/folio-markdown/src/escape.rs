//! HTML escaping for literal text.

/// Escape HTML special characters, including both quote styles so the
/// result is safe inside attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
