//! Payload helpers shared by both backends.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a timestamp in RFC 3339 (`"2026-10-19T07:30:00Z"`), naive ISO
/// (`"2026-10-19T07:30:00.123"`), or `SQLite`'s default format
/// (`"2026-10-19 07:30:00"`).
#[must_use]
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
}

/// Export timestamp embedded in a serialized snapshot.
///
/// Falls back to the current time when `export_date` is missing or unparsable.
#[must_use]
pub fn export_timestamp(payload: &serde_json::Value) -> DateTime<Utc> {
    payload
        .get("export_date")
        .and_then(serde_json::Value::as_str)
        .and_then(parse_datetime)
        .unwrap_or_else(|| {
            tracing::debug!("snapshot payload has no usable export_date; using now");
            Utc::now()
        })
}

/// Stored documents that mean "nothing stored": empty text or `{}`.
#[must_use]
pub fn is_blank_payload(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "{}"
}
