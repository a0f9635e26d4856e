//! Timestamp utilities
//!
//! Task rows store `created_at`/`updated_at` as text in the form
//! `YYYY-MM-DDTHH:MM:SSZ`. Keeping a single fixed-width UTC format makes string
//! order match chronological order.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Current instant in UTC, second precision, `Z` suffix.
pub fn now_utc_iso8601() -> String {
    format_utc_iso8601(&Utc::now())
}

/// Render any instant in UTC, dropping fractional seconds.
pub fn format_utc_iso8601<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Whether `value` is exactly `YYYY-MM-DDTHH:MM:SSZ`.
///
/// chrono's parser tolerates signs, padding and unpadded fields, so the parsed
/// instant must also render back to the same string.
pub fn is_utc_iso8601(value: &str) -> bool {
    if value.len() != 20 || !value.is_ascii() || !value.ends_with('Z') {
        return false;
    }
    NaiveDateTime::parse_from_str(&value[..19], "%Y-%m-%dT%H:%M:%S")
        .map(|parsed| format_utc_iso8601(&parsed.and_utc()) == value)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_now_matches_format() {
        for _ in 0..5 {
            let stamp = now_utc_iso8601();
            assert!(is_utc_iso8601(&stamp), "bad timestamp: {}", stamp);
        }
    }

    #[test]
    fn test_fractional_seconds_dropped() {
        let instant = Utc
            .with_ymd_and_hms(2026, 1, 28, 12, 34, 56)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(789))
            .unwrap();
        assert_eq!(format_utc_iso8601(&instant), "2026-01-28T12:34:56Z");
    }

    #[test]
    fn test_offset_converted_to_utc() {
        // 01:30 at +05:30 is 20:00 the previous day in UTC
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let instant = offset.with_ymd_and_hms(2026, 1, 28, 1, 30, 0).unwrap();
        let stamp = format_utc_iso8601(&instant);
        assert_eq!(stamp, "2026-01-27T20:00:00Z");
        assert!(!stamp.contains("+00:00"));
    }

    #[test]
    fn test_negative_offset_converted_to_utc() {
        let offset = FixedOffset::west_opt(8 * 3600).unwrap();
        let instant = offset.with_ymd_and_hms(2026, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(format_utc_iso8601(&instant), "2027-01-01T07:00:00Z");
    }

    #[test]
    fn test_lexicographic_order_matches_chronological() {
        let earlier = format_utc_iso8601(&Utc.with_ymd_and_hms(2026, 1, 9, 23, 59, 59).unwrap());
        let later = format_utc_iso8601(&Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap());
        assert!(earlier < later);
    }

    #[test]
    fn test_is_utc_iso8601_rejects_other_forms() {
        assert!(is_utc_iso8601("2026-01-28T12:34:56Z"));
        assert!(!is_utc_iso8601("2026-01-28T12:34:56+00:00"));
        assert!(!is_utc_iso8601("2026-01-28T12:34:56.123Z"));
        assert!(!is_utc_iso8601("2026-01-28 12:34:56Z"));
        assert!(!is_utc_iso8601("2026-13-28T12:34:56Z"));
        assert!(!is_utc_iso8601("+2026-01-28T12:34:5Z"));
        assert!(!is_utc_iso8601("2026-01-28T 1:34:56Z"));
        assert!(!is_utc_iso8601("2026-1-28T12:34:56ZZ"));
        assert!(!is_utc_iso8601(""));
    }
}
