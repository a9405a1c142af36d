//! Lenient parsing of the timestamps found in seed records.
//!
//! Seed data mixes RFC 3339 (`2024-03-15T14:02:26Z`), naive datetimes
//! (`2024-03-15T14:02:26`, `2024-03-15 14:02:26`) and bare dates (`2024-03-15`).

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a record timestamp into a naive UTC datetime.
/// Bare dates resolve to midnight. Returns `None` for anything unrecognised.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Calendar date of a record timestamp (used by date-range filters).
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_record_date("2024-03-15"), Some(expected));
        assert_eq!(parse_record_date("2024-03-15T14:02:26Z"), Some(expected));
        assert_eq!(parse_record_date("2024-03-15T14:02:26.123+00:00"), Some(expected));
        assert_eq!(parse_record_date("2024-03-15T14:02:26"), Some(expected));
        assert_eq!(parse_record_date("2024-03-15 14:02:26"), Some(expected));
    }

    #[test]
    fn test_offset_is_normalised_to_utc() {
        let ts = parse_timestamp("2024-03-15T01:00:00+03:00").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_record_date("2024-13-40"), None);
    }
}
