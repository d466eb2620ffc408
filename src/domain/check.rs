//! Primitive predicates. All of them fail closed: malformed input yields
//! `false`, never a panic.

use chrono::{DateTime, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// `HH:MM`, 24-hour clock, both parts zero-padded.
pub fn is_valid_time_of_day(s: &str) -> bool {
    parse_time_of_day(s).is_some()
}

pub(crate) fn parse_time_of_day(s: &str) -> Option<(u8, u8)> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let digit = |b: u8| b.is_ascii_digit().then(|| b - b'0');
    let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;
    (hour <= 23 && minute <= 59).then_some((hour, minute))
}

/// Syntactic `local@domain.tld` check. No DNS lookup.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Non-empty and made only of digits, spaces, `+`, `-`, `(` and `)`.
pub fn is_valid_phone(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

pub fn is_valid_lat_lng(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

/// RFC 3339 date-time, or a date-time without offset (read as UTC).
pub fn is_valid_iso_date(s: &str) -> bool {
    parse_iso_date(s).is_some()
}

pub(crate) fn parse_iso_date(s: &str) -> Option<DateTime<chrono::Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Some(parsed.to_utc());
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_accepts_24_hour_clock() {
        assert!(is_valid_time_of_day("00:00"));
        assert!(is_valid_time_of_day("09:30"));
        assert!(is_valid_time_of_day("23:59"));

        assert!(!is_valid_time_of_day("24:00"));
        assert!(!is_valid_time_of_day("12:60"));
        assert!(!is_valid_time_of_day("9:30"));
        assert!(!is_valid_time_of_day("09:30:00"));
        assert!(!is_valid_time_of_day("09-30"));
        assert!(!is_valid_time_of_day(""));
        assert!(!is_valid_time_of_day("０9:30"));
    }

    #[test]
    fn email_is_syntactic_only() {
        assert!(is_valid_email("info@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));

        assert!(!is_valid_email("info@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("info@@example.com"));
        assert!(!is_valid_email("info example@example.com"));
        assert!(!is_valid_email("info@.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_allows_common_punctuation() {
        assert!(is_valid_phone("+1 (212) 555-0100"));
        assert!(is_valid_phone("0123456789"));

        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("555-CALL"));
        assert!(!is_valid_phone("555.0100"));
    }

    #[test]
    fn lat_lng_is_range_checked() {
        assert!(is_valid_lat_lng(40.7128, -74.0060));
        assert!(is_valid_lat_lng(90.0, 180.0));
        assert!(is_valid_lat_lng(-90.0, -180.0));

        assert!(!is_valid_lat_lng(91.0, 0.0));
        assert!(!is_valid_lat_lng(0.0, -180.5));
        assert!(!is_valid_lat_lng(f64::NAN, 0.0));
    }

    #[test]
    fn iso_date_accepts_rfc3339_and_naive_forms() {
        assert!(is_valid_iso_date("2024-03-01T10:15:00.000Z"));
        assert!(is_valid_iso_date("2024-03-01T10:15:00+02:00"));
        assert!(is_valid_iso_date("2024-03-01T10:15:00"));
        assert!(is_valid_iso_date("2024-03-01T10:15"));

        assert!(!is_valid_iso_date("2024-03-01"));
        assert!(!is_valid_iso_date("2024-13-01T10:15:00Z"));
        assert!(!is_valid_iso_date("yesterday"));
    }
}
