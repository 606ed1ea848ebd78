//! # Temporal Types
//!
//! - [`Timestamp`]: UTC-only, seconds precision, rendered
//!   `YYYY-MM-DDTHH:MM:SSZ`. Used for `issuedAt` and `signedAt`, where a
//!   local offset would change the canonical bytes of a signed payload.
//! - [`parse_iso_date`]: the date grammar accepted for credential validity
//!   fields. A value must have ISO-8601 date or datetime *shape* and also
//!   name a real calendar instant (`2026-02-30` has the shape but fails).
//! - Validity helpers: [`calculate_valid_until`] and [`is_expired_at`].

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::level::CertificationLevel;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse exactly `YYYY-MM-DDTHH:MM:SSZ`.
    ///
    /// Explicit offsets (including `+00:00`), fractional seconds (including
    /// `.000`) and leap seconds are rejected. A timestamp is part of the
    /// signed bytes, so the accepted text must be the text that is
    /// re-rendered.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTimestamp(s.to_string());
        if !s.ends_with('Z') {
            return Err(invalid());
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|_| invalid())?;
        let ts = Self(dt.with_timezone(&Utc));
        if ts.0.nanosecond() != 0 || ts.to_iso8601() != s {
            return Err(invalid());
        }
        Ok(ts)
    }

    /// The underlying `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ---------------------------------------------------------------------------
// ISO-8601 validity dates
// ---------------------------------------------------------------------------

fn has_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

/// Parse a validity date into the instant it denotes.
///
/// Accepted shapes:
///
/// - `YYYY-MM-DD` (midnight UTC)
/// - `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC)
/// - either datetime form with a `Z` or `±HH:MM` suffix
///
/// Returns `None` when the shape is wrong or the calendar date does not exist.
pub fn parse_iso_date(s: &str) -> Option<DateTime<Utc>> {
    if s.len() < 10 || !s.is_char_boundary(10) || !has_date_shape(&s[..10]) {
        return None;
    }
    let date = NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d").ok()?;
    if s.len() == 10 {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    if s.as_bytes()[10] != b'T' {
        return None;
    }

    let has_offset = s.ends_with('Z')
        || s.ends_with('z')
        || s[11..].contains('+')
        || s[11..].contains('-');
    if has_offset {
        return DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Default end of validity for a credential issued at `level` from `valid_from`.
///
/// Adds the level's validity period in whole years. A start of February 29
/// lands on February 28 in non-leap years.
pub fn calculate_valid_until(level: CertificationLevel, valid_from: NaiveDate) -> Option<NaiveDate> {
    valid_from.checked_add_months(Months::new(12 * level.validity_years()))
}

/// Whether a credential with `valid_until` has expired at `now`.
///
/// Returns `None` if `valid_until` is not a parseable validity date.
pub fn is_expired_at(valid_until: &str, now: DateTime<Utc>) -> Option<bool> {
    parse_iso_date(valid_until).map(|until| until < now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_truncates_and_formats() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_456_789).unwrap());
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45Z");
        assert_eq!(format!("{ts}"), ts.to_iso8601());
    }

    #[test]
    fn timestamp_parse_rejects_offsets() {
        assert!(Timestamp::parse("2026-01-15T12:00:00Z").is_ok());
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn timestamp_parse_rejects_fractional_seconds() {
        for s in [
            "2026-01-01T09:30:00.123Z",
            "2026-01-01T09:30:00.000Z",
            "2026-12-31T23:59:60Z",
            "2026-01-01t09:30:00Z",
        ] {
            assert_eq!(
                Timestamp::parse(s),
                Err(ValidationError::InvalidTimestamp(s.to_string())),
                "{s}"
            );
        }
        let err = serde_json::from_str::<Timestamp>("\"2026-01-01T09:30:00.123Z\"").unwrap_err();
        assert!(err.to_string().contains("whole seconds"));
    }

    #[test]
    fn timestamp_serde_roundtrip() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-01-15T12:00:00Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }

    #[test]
    fn iso_date_accepts_dates_and_datetimes() {
        let midnight = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_iso_date("2026-01-01"), Some(midnight));
        assert_eq!(parse_iso_date("2026-01-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_iso_date("2026-01-01T00:00:00.000Z"), Some(midnight));
        assert_eq!(parse_iso_date("2026-01-01T00:00:00"), Some(midnight));
        assert_eq!(parse_iso_date("2026-01-01T00:00"), Some(midnight));
        assert_eq!(parse_iso_date("2026-01-01T05:30:00+05:30"), Some(midnight));
    }

    #[test]
    fn iso_date_rejects_bad_shapes() {
        for bad in [
            "",
            "2026-1-01",
            "26-01-01",
            "2026/01/01",
            "01-01-2026",
            "2026-01-01 00:00:00",
            "2026-01-01T",
            "2026-01-01Tnoon",
            "tomorrow",
            "+2026-01-01",
        ] {
            assert!(parse_iso_date(bad).is_none(), "{bad:?}");
        }
    }

    #[test]
    fn iso_date_rejects_impossible_calendar_dates() {
        assert!(parse_iso_date("2026-02-30").is_none());
        assert!(parse_iso_date("2026-13-01").is_none());
        assert!(parse_iso_date("2025-02-29").is_none());
        assert!(parse_iso_date("2024-02-29").is_some());
        assert!(parse_iso_date("2026-01-01T25:00:00Z").is_none());
    }

    #[test]
    fn valid_until_by_level() {
        let from = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(
            calculate_valid_until(CertificationLevel::Bronze, from),
            NaiveDate::from_ymd_opt(2027, 3, 15)
        );
        assert_eq!(
            calculate_valid_until(CertificationLevel::Gold, from),
            NaiveDate::from_ymd_opt(2028, 3, 15)
        );
    }

    #[test]
    fn valid_until_clamps_leap_day() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            calculate_valid_until(CertificationLevel::Silver, from),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
    }

    #[test]
    fn expiry_check() {
        let now = Utc.with_ymd_and_hms(2027, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(is_expired_at("2027-01-01", now), Some(true));
        assert_eq!(is_expired_at("2028-01-01", now), Some(false));
        assert_eq!(is_expired_at("garbage", now), None);
    }
}
