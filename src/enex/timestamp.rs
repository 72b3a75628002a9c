use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

use crate::error::TimestampError;

static ENEX_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{8}T[0-9]{6}Z").unwrap());

/// Parse Evernote date format (YYYYMMDDTHHmmssZ)
///
/// The token may be embedded in surrounding text; the first match wins and
/// is read as UTC.
pub fn parse_updated(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    let token = ENEX_DATE_RE
        .find(raw)
        .ok_or(TimestampError::NoToken)?
        .as_str();

    NaiveDateTime::parse_from_str(token, "%Y%m%dT%H%M%SZ")
        .map(|dt| dt.and_utc())
        .map_err(|e| TimestampError::Invalid {
            token: token.to_string(),
            reason: e.to_string(),
        })
}
