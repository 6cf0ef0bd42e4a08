//! Pure field checks and normalisers used by the row classifier.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;
use validator::ValidateEmail;

use super::draft::MobileNumber;

/// Length of a local mobile number.
pub const MOBILE_DIGITS: usize = 10;

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 50;

/// Words of letters joined by a single space, apostrophe or hyphen, or by
/// an initial's dot (`R. K. Narayan`).
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{L}+(?:(?:\. ?|[ '\-])\p{L}+)*\.?$").expect("valid regex")
});

/// Text date formats found in candidate sheets, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

pub fn validate_name(value: &str) -> bool {
    let name = value.trim();
    let len = name.chars().count();
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) && NAME_RE.is_match(name)
}

pub fn validate_email(value: &str) -> bool {
    value.trim().to_string().validate_email()
}

/// Parse a text date into an ISO-8601 UTC timestamp with millisecond
/// precision (`2024-01-05T00:00:00.000Z`). Blank or unrecognised text
/// yields `None`.
pub fn parse_date(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(to_iso(timestamp.with_timezone(&Utc)));
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| to_iso(midnight.and_utc()))
}

fn to_iso(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalise a numeric phone cell. Only non-negative whole numbers with
/// exactly [`MOBILE_DIGITS`] digits are accepted.
pub fn normalize_mobile(value: f64) -> Option<MobileNumber> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    let digits = format!("{value:.0}");
    (digits.len() == MOBILE_DIGITS).then(|| MobileNumber::india(digits))
}

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_score(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
