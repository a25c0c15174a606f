use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parse a wire date into a comparable instant.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    parse_date_only(s).map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Like [`parse_instant`], but a bare date resolves to the last instant of
/// that day. Used for inclusive upper bounds.
pub fn parse_instant_end_of_day(s: &str) -> Option<DateTime<Utc>> {
    match parse_date_only(s.trim()) {
        Some(d) => {
            let end = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?;
            Some(d.and_time(end).and_utc())
        }
        None => parse_instant(s),
    }
}

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_formats() {
        let a = parse_instant("2024-01-01").unwrap();
        let b = parse_instant("2024-01-01T00:00:00").unwrap();
        let c = parse_instant("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);

        let offset = parse_instant("2024-01-01T03:00:00+03:00").unwrap();
        assert_eq!(offset, c);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("yesterday").is_none());
        assert!(parse_instant("2024-13-40").is_none());
    }

    #[test]
    fn test_end_of_day() {
        let end = parse_instant_end_of_day("2024-02-01").unwrap();
        assert_eq!(end.day(), 1);
        assert_eq!(end.hour(), 23);
        assert_eq!(end.minute(), 59);

        // Explicit times are taken as given
        let exact = parse_instant_end_of_day("2024-02-01T10:00:00Z").unwrap();
        assert_eq!(exact.hour(), 10);
    }
}
