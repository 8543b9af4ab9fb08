//! Field-level defaulting shared by every record family.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use pronote_core::DateWindow;
use pronote_portal::upstream::{UpstreamNamed, UpstreamValue};

pub const UNKNOWN_SUBJECT: &str = "Inconnu";
pub const DEFAULT_OUT_OF: &str = "20";
pub const DEFAULT_COEFFICIENT: f64 = 1.0;
pub const DEFAULT_MEAL: &str = "Dejeuner";

/// Duration in hours from a number or an `"XhYY"` string.
///
/// `"5h30"` is 5.5. A missing or unparsable fragment counts as zero, and
/// anything unreadable overall is 0.0.
#[must_use]
pub fn parse_hours(value: &UpstreamValue) -> f64 {
    match value {
        UpstreamValue::Number(n) if n.is_finite() => *n,
        UpstreamValue::Number(_) => 0.0,
        UpstreamValue::Text(raw) => {
            let raw = raw.trim().to_lowercase();
            if raw.contains('h') {
                let mut parts = raw.split('h');
                let hours = parts.next().map_or(0.0, fragment);
                let minutes = parts.next().map_or(0.0, fragment);
                hours + minutes / 60.0
            } else {
                fragment(&raw)
            }
        }
    }
}

fn fragment(raw: &str) -> f64 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Whole minutes, truncated.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn whole_minutes(value: Option<&UpstreamValue>) -> i64 {
    value
        .and_then(UpstreamValue::to_number)
        .filter(|v| v.is_finite())
        .map_or(0, |v| v.trunc() as i64)
}

pub(crate) fn subject(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNKNOWN_SUBJECT.to_string(),
    }
}

pub(crate) fn text(value: Option<&UpstreamValue>) -> String {
    value.map(UpstreamValue::to_text).unwrap_or_default()
}

pub(crate) fn out_of(value: Option<&UpstreamValue>) -> String {
    value
        .filter(|v| !v.is_blank())
        .map_or_else(|| DEFAULT_OUT_OF.to_string(), UpstreamValue::to_text)
}

pub(crate) fn coefficient(value: Option<&UpstreamValue>) -> f64 {
    value
        .filter(|v| !v.is_blank())
        .and_then(UpstreamValue::to_number)
        .unwrap_or(DEFAULT_COEFFICIENT)
}

pub(crate) fn names(items: Option<&[UpstreamNamed]>) -> Vec<String> {
    items
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item.name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an upstream date or date-time. Blank and missing values are `None`;
/// anything else that does not parse is an error for the whole family.
pub(crate) fn timestamp(raw: Option<&str>) -> Result<Option<NaiveDateTime>, String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.naive_local()));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(at));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| Some(d.and_time(NaiveTime::MIN)))
        .map_err(|_| format!("unparsable date {raw:?}"))
}

pub(crate) fn render_date(at: Option<NaiveDateTime>) -> String {
    at.map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub(crate) fn render_datetime(at: Option<NaiveDateTime>) -> String {
    at.map(|at| at.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Undated records stay in.
pub(crate) fn in_window(window: DateWindow, at: Option<NaiveDateTime>) -> bool {
    at.is_none_or(|at| window.contains_datetime(at))
}
