//! Field validation helpers shared by the registries and the access gate.

use chrono::{DateTime, NaiveDate};

use crate::errors::ValidationErrors;

/// Parse a calendar date from client input.
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps (the date part is kept,
/// in the timestamp's own offset). Surrounding whitespace is ignored.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Validate a date field, recording a failure under `field` when it does not parse.
pub fn check_date(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<NaiveDate> {
    let parsed = parse_calendar_date(raw);
    if parsed.is_none() {
        errors.push(field, "must be a valid date (YYYY-MM-DD)");
    }
    parsed
}

/// Validate a required text field: trimmed length must be in `1..=max_chars`.
///
/// Returns the trimmed value when valid.
pub fn check_text(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &str,
    max_chars: usize,
) -> Option<String> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        errors.push(field, "is required");
        None
    } else if len > max_chars {
        errors.push(field, format!("must be at most {max_chars} characters"));
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim optional free text; blank input becomes `None`.
#[must_use]
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
