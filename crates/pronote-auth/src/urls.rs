//! Input shaping for the two login flows.

const LOGIN_MARKER: &str = "login=true";

/// The stored portal URL with the login marker query parameter.
///
/// The URL carries session-scoping parameters (`fd`, `bydlg`, ...) that must
/// be kept as they are.
#[must_use]
pub fn login_url(stored: &str) -> String {
    if stored.contains(LOGIN_MARKER) {
        stored.to_string()
    } else if stored.contains('?') {
        format!("{stored}&{LOGIN_MARKER}")
    } else {
        format!("{stored}?{LOGIN_MARKER}")
    }
}

/// Undo the percent-encoded braces some QR scanners leave in the payload.
#[must_use]
pub fn normalize_qr_payload(raw: &str) -> String {
    raw.trim()
        .replace("%7B", "{")
        .replace("%7b", "{")
        .replace("%7D", "}")
        .replace("%7d", "}")
}
