// File: ./src/model/dates.rs
// Parses the date tokens used by time-bearing directives. Tokens are naive;
// the configured timezone designator supplies the missing context.
use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

// Attempted most specific first; the missing fields default to zero.
const FORMAT_FULL: &str = "%y-%m-%d %H:%M:%S";
const FORMAT_MINUTES: &str = "%y-%m-%d %H:%M";
const FORMAT_DATE: &str = "%y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("'{0}' matches no supported date format")]
    Unrecognized(String),
    #[error("'{0}' does not exist in timezone {1}")]
    NonexistentLocalTime(String, Tz),
}

/// Turns a raw date token into an absolute instant, resolved in `tz`.
///
/// Two-digit years follow chrono's `%y` century inference (00-68 maps to
/// 20xx, 69-99 to 19xx). An ambiguous local time (DST fold) takes the
/// earlier of the two mappings.
pub fn parse_instant(token: &str, tz: Tz) -> Result<DateTime<Utc>, DateError> {
    let naive = parse_naive(token).ok_or_else(|| DateError::Unrecognized(token.to_string()))?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(DateError::NonexistentLocalTime(token.to_string(), tz)),
    }
}

fn parse_naive(token: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(token, FORMAT_FULL) {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(token, FORMAT_MINUTES) {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(token, FORMAT_DATE) {
        return Some(d.and_time(NaiveTime::MIN));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn utc() -> Tz {
        "UTC".parse().unwrap()
    }

    #[test]
    fn parses_second_precision() {
        let got = parse_instant("25-01-01 10:30:45", utc()).unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 1, 1, 10, 30, 45).unwrap());
    }

    #[test]
    fn parses_minute_precision() {
        let got = parse_instant("25-01-01 10:30", utc()).unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 1, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let got = parse_instant("25-01-01", utc()).unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage_and_empty_tokens() {
        assert!(matches!(
            parse_instant("not-a-date", utc()),
            Err(DateError::Unrecognized(_))
        ));
        assert!(parse_instant("", utc()).is_err());
        // Trailing content beyond a known format is not silently dropped.
        assert!(parse_instant("25-01-01 10:30:45 extra", utc()).is_err());
    }

    #[test]
    fn named_zone_offsets_are_applied() {
        let brussels: Tz = "Europe/Brussels".parse().unwrap();
        // Winter time, UTC+1.
        let got = parse_instant("25-01-01 10:00", brussels).unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn dst_fold_takes_the_earlier_mapping() {
        let brussels: Tz = "Europe/Brussels".parse().unwrap();
        // 2025-10-26 02:30 happened twice in Brussels (clocks fell back at
        // 03:00); the earlier, CEST (+02:00) occurrence wins.
        let got = parse_instant("25-10-26 02:30", brussels).unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2025, 10, 26, 0, 30, 0).unwrap());
    }

    #[test]
    fn dst_gap_is_an_error() {
        let brussels: Tz = "Europe/Brussels".parse().unwrap();
        // 2025-03-30 02:30 never happened in Brussels (clocks jumped to 03:00).
        assert!(matches!(
            parse_instant("25-03-30 02:30", brussels),
            Err(DateError::NonexistentLocalTime(..))
        ));
    }
}
