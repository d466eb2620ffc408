use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use phonenumber::country;

use crate::config::ModelConfig;
use crate::domain::check;
use crate::domain::validation::{ErrorKind, FieldError};

/// Reject blank input and anything longer than `max` characters.
fn bounded(field: &str, value: &str, max: usize) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::missing(field));
    }
    let len = value.chars().count();
    if len > max {
        return Err(FieldError::range(
            field,
            format!("{len} characters exceeds the maximum of {max}"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Required free text (names, subjects, address parts).
///
/// Invariant: non-empty after trimming and at most the configured length.
pub struct RequiredText(String);

impl RequiredText {
    /// Trim and validate a single-line value.
    pub fn line(field: &str, value: &str, config: &ModelConfig) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        bounded(field, trimmed, config.max_line_len())?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate a multi-line body. Surrounding whitespace is preserved.
    pub fn body(field: &str, value: &str, config: &ModelConfig) -> Result<Self, FieldError> {
        bounded(field, value, config.max_body_len())?;
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Syntactically valid email address.
///
/// Invariant: trimmed and matching [`check::is_valid_email`].
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(field: &str, value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::missing(field));
        }
        if !check::is_valid_email(trimmed) {
            return Err(FieldError::invalid_format(field, "an address like name@example.com"));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Phone number as entered, e.g. `+1 (212) 555-0100`.
///
/// Invariant: trimmed and matching [`check::is_valid_phone`]. When the
/// config names a region, the number is also dialable there.
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(field: &str, value: &str, config: &ModelConfig) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::missing(field));
        }
        if !check::is_valid_phone(trimmed) {
            return Err(FieldError::invalid_format(
                field,
                "digits, spaces, '+', '-', '(' and ')' only",
            ));
        }
        if let Some(region) = config.phone_region() {
            let dialable = phonenumber::parse(Some(region), trimmed)
                .map(|parsed| phonenumber::is_valid(&parsed))
                .unwrap_or(false);
            if !dialable {
                return Err(FieldError::invalid_format(
                    field,
                    &format!("a valid phone number for region {region:?}"),
                ));
            }
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The number as entered (trimmed).
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// E.164 form (`+12125550100`), resolving local numbers against `region`.
    ///
    /// Returns `None` when the number cannot be parsed.
    pub fn e164(&self, region: Option<country::Id>) -> Option<String> {
        let parsed = phonenumber::parse(region, &self.0).ok()?;
        Some(
            phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string(),
        )
    }

    /// Digits-only form, suitable for `tel:` links.
    pub fn dial_string(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        if self.0.starts_with('+') {
            out.push('+');
        }
        out.extend(self.0.chars().filter(char::is_ascii_digit));
        out
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Wall-clock time within a day, minute precision.
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Build from parts; `None` when out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(Self { hour, minute })
    }

    /// Parse `HH:MM`.
    pub fn parse(field: &str, value: &str) -> Result<Self, FieldError> {
        if value.trim().is_empty() {
            return Err(FieldError::missing(field));
        }
        check::parse_time_of_day(value)
            .map(|(hour, minute)| Self { hour, minute })
            .ok_or_else(|| FieldError::invalid_format(field, "a 24-hour time as HH:MM"))
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Map pin location.
///
/// Invariant: finite, `lat` in `[-90, 90]`, `lng` in `[-180, 180]`.
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    pub const LAT_FIELD: &'static str = "lat";
    pub const LNG_FIELD: &'static str = "lng";

    /// Validate both axes, reporting each one that is out of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        if !(-90.0..=90.0).contains(&lat) {
            errors.push(FieldError::range(
                Self::LAT_FIELD,
                format!("{lat} is outside [-90, 90]"),
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            errors.push(FieldError::range(
                Self::LNG_FIELD,
                format!("{lng} is outside [-180, 180]"),
            ));
        }
        if errors.is_empty() {
            debug_assert!(check::is_valid_lat_lng(lat, lng));
            Ok(Self { lat, lng })
        } else {
            Err(errors)
        }
    }

    pub fn lat(self) -> f64 {
        self.lat
    }

    pub fn lng(self) -> f64 {
        self.lng
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the company logo lives: an absolute URL or a storage path.
pub enum LogoRef {
    Url(url::Url),
    /// Storage key such as `uploads/logo.png`. Never contains whitespace.
    Path(String),
}

impl LogoRef {
    pub fn parse(field: &str, value: &str, config: &ModelConfig) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::missing(field));
        }
        if trimmed.contains("://") {
            let url = url::Url::parse(trimmed)
                .map_err(|_| FieldError::invalid_format(field, "an absolute URL"))?;
            if !config.allows_logo_scheme(url.scheme()) {
                return Err(FieldError::new(
                    field,
                    ErrorKind::InvalidFormat,
                    format!("URL scheme {} is not allowed", url.scheme()),
                ));
            }
            return Ok(Self::Url(url));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(FieldError::invalid_format(
                field,
                "a URL or a storage path without whitespace",
            ));
        }
        Ok(Self::Path(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(url) => url.as_str(),
            Self::Path(path) => path,
        }
    }
}

impl fmt::Display for LogoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Point in time, stored in UTC.
///
/// Invariant: millisecond precision, matching the wire format.
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wrap `value`, dropping anything finer than a millisecond.
    pub fn new(value: DateTime<Utc>) -> Self {
        Self(value.trunc_subsecs(3))
    }

    /// Parse an ISO-8601 date-time (see [`check::is_valid_iso_date`]).
    pub fn parse(field: &str, value: &str) -> Result<Self, FieldError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::missing(field));
        }
        check::parse_iso_date(trimmed)
            .map(Self::new)
            .ok_or_else(|| FieldError::invalid_format(field, "an ISO-8601 date-time"))
    }

    pub fn value(self) -> DateTime<Utc> {
        self.0
    }

    /// RFC 3339 with millisecond precision and a `Z` suffix.
    pub fn to_iso_string(self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

/// Trimmed, non-blank identifier. Reuses the allocation when nothing is trimmed.
fn identifier(field: &str, value: String) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::missing(field));
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of a contact message.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    pub const FIELD: &'static str = "id";

    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        identifier(Self::FIELD, value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Identifier of a FAQ entry.
///
/// Invariant: non-empty after trimming.
pub struct FaqId(String);

impl FaqId {
    pub const FIELD: &'static str = "id";

    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        identifier(Self::FIELD, value.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FaqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_lines_and_keeps_bodies() {
        let config = ModelConfig::default();
        let line = RequiredText::line("name", "  Ada  ", &config).unwrap();
        assert_eq!(line.as_str(), "Ada");

        let body = RequiredText::body("message", " hi\n", &config).unwrap();
        assert_eq!(body.as_str(), " hi\n");

        let err = RequiredText::line("name", "   ", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn required_text_enforces_length_limits() {
        let config = ModelConfig::builder().max_line_len(3).build();
        assert!(RequiredText::line("name", "abc", &config).is_ok());
        let err = RequiredText::line("name", "abcd", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeViolation);
    }

    #[test]
    fn email_parse_distinguishes_missing_from_malformed() {
        assert_eq!(
            EmailAddress::parse("email", "").unwrap_err().kind(),
            ErrorKind::MissingField
        );
        assert_eq!(
            EmailAddress::parse("email", "nope").unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
        let email = EmailAddress::parse("email", " hello@shop.example ").unwrap();
        assert_eq!(email.as_str(), "hello@shop.example");
        assert_eq!(email.domain(), "shop.example");
    }

    #[test]
    fn phone_number_normalizes_to_e164() {
        let config = ModelConfig::default();
        let phone = PhoneNumber::parse("phone", " +1 (212) 555-0100 ", &config).unwrap();
        assert_eq!(phone.raw(), "+1 (212) 555-0100");
        assert_eq!(phone.e164(None).as_deref(), Some("+12125550100"));
        assert_eq!(phone.dial_string(), "+12125550100");
    }

    #[test]
    fn phone_number_region_check_is_opt_in() {
        let lenient = ModelConfig::default();
        assert!(PhoneNumber::parse("phone", "123", &lenient).is_ok());

        let strict = ModelConfig::builder()
            .phone_region(country::Id::US)
            .build();
        let err = PhoneNumber::parse("phone", "123", &strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        assert!(PhoneNumber::parse("phone", "(201) 555-0123", &strict).is_ok());
    }

    #[test]
    fn time_of_day_orders_and_formats() {
        let open = TimeOfDay::parse("open", "09:00").unwrap();
        let close = TimeOfDay::parse("close", "18:30").unwrap();
        assert!(open < close);
        assert_eq!(close.to_string(), "18:30");
        assert_eq!(close.minutes_since_midnight(), 18 * 60 + 30);
        assert_eq!(TimeOfDay::new(24, 0), None);
        assert_eq!(
            TimeOfDay::parse("open", "9am").unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
    }

    #[test]
    fn coordinates_report_each_bad_axis() {
        let nyc = Coordinates::new(40.7128, -74.0060).unwrap();
        assert_eq!(nyc.lat(), 40.7128);

        let errors = Coordinates::new(91.0, 200.0).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind() == ErrorKind::RangeViolation));

        let errors = Coordinates::new(f64::NAN, 0.0).unwrap_err();
        assert_eq!(errors[0].field(), "lat");
    }

    #[test]
    fn logo_accepts_urls_and_storage_paths() {
        let config = ModelConfig::default();
        assert!(matches!(
            LogoRef::parse("logo", "https://cdn.example.com/logo.png", &config),
            Ok(LogoRef::Url(_))
        ));
        assert_eq!(
            LogoRef::parse("logo", "uploads/logo.png", &config).unwrap(),
            LogoRef::Path("uploads/logo.png".to_owned())
        );
        assert!(LogoRef::parse("logo", "ftp://example.com/logo.png", &config).is_err());
        assert!(LogoRef::parse("logo", "my logo.png", &config).is_err());
    }

    #[test]
    fn timestamp_renders_utc_millis() {
        let ts = Timestamp::parse("date", "2024-03-01T12:00:00+02:00").unwrap();
        assert_eq!(ts.to_iso_string(), "2024-03-01T10:00:00.000Z");
        assert_eq!(
            Timestamp::parse("date", "not a date").unwrap_err().kind(),
            ErrorKind::InvalidFormat
        );
    }

    #[test]
    fn timestamp_drops_sub_millisecond_precision() {
        let precise = Timestamp::parse("date", "2024-03-01T10:00:00.123456789Z").unwrap();
        assert_eq!(precise.to_iso_string(), "2024-03-01T10:00:00.123Z");
        let reparsed = Timestamp::parse("date", &precise.to_iso_string()).unwrap();
        assert_eq!(reparsed, precise);
    }

    #[test]
    fn ids_trim_and_reject_blank() {
        assert_eq!(MessageId::new(" m-1 ").unwrap().as_str(), "m-1");
        assert!(MessageId::new("  ").is_err());
        assert_eq!(FaqId::new("faq-1").unwrap().to_string(), "faq-1");
        assert_eq!(FaqId::new("faq-2").unwrap().as_str(), "faq-2");
        let err = FaqId::new("\t").unwrap_err();
        assert_eq!((err.field(), err.kind()), ("id", ErrorKind::MissingField));
    }
}
