use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{Error, Result};

/// Default exchange timezone for the session clock.
pub const DEFAULT_EXCHANGE_TZ: Tz = chrono_tz::America::New_York;

/// Default timezone used when instants are shown to the user.
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::Europe::Amsterdam;

/// Parses an IANA timezone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Error::InvalidConfigValue(format!("unknown timezone '{}': {}", name, e)))
}

/// Converts a wall-clock time in `tz` to an absolute instant.
///
/// Ambiguous local times (DST fall-back) resolve to the earliest instant.
/// Local times inside a DST gap resolve to the first valid minute after it.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    let mut candidate = local;
    // Gaps are at most a few hours; step forward a minute at a time.
    for _ in 0..(24 * 60) {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => candidate += Duration::minutes(1),
        }
    }
    // Unreachable for real timezone data; treat the wall-clock value as UTC.
    Utc.from_utc_datetime(&local)
}

/// Parses an ISO-8601 instant.
///
/// Accepts RFC 3339 strings with an offset, and naive date-times which are
/// taken to be UTC. Returns `None` for anything else.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("America/New_York").unwrap(), DEFAULT_EXCHANGE_TZ);
        assert_eq!(parse_timezone(" Europe/Amsterdam ").unwrap(), DEFAULT_DISPLAY_TZ);
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(Error::InvalidConfigValue(_))
        ));
    }

    #[test]
    fn test_resolve_local_regular_time() {
        // 2024-01-08 09:30 EST == 14:30 UTC
        let utc = resolve_local(DEFAULT_EXCHANGE_TZ, naive(2024, 1, 8, 9, 30));
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 1, 8, 14, 30, 0).unwrap());

        // 2024-07-08 09:30 EDT == 13:30 UTC
        let utc = resolve_local(DEFAULT_EXCHANGE_TZ, naive(2024, 7, 8, 9, 30));
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 7, 8, 13, 30, 0).unwrap());
    }

    #[test]
    fn test_resolve_local_in_gap_moves_forward() {
        // 2024-03-10 02:30 does not exist in New York; clocks jump 02:00 -> 03:00 EDT
        let utc = resolve_local(DEFAULT_EXCHANGE_TZ, naive(2024, 3, 10, 2, 30));
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 3, 10, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_local_ambiguous_takes_earliest() {
        // 2024-11-03 01:30 happens twice; the first one is EDT (UTC-4)
        let utc = resolve_local(DEFAULT_EXCHANGE_TZ, naive(2024, 11, 3, 1, 30));
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 11, 3, 5, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 14, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-05-01T14:00:00Z"), Some(expected));
        assert_eq!(parse_instant("2024-05-01T16:00:00+02:00"), Some(expected));
        assert_eq!(parse_instant("2024-05-01T14:00:00"), Some(expected));
        assert_eq!(parse_instant("2024-05-01 14:00:00"), Some(expected));
        assert_eq!(parse_instant("2024-05-01T14:00"), Some(expected));
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("yesterday"), None);
    }
}
