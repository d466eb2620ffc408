//! Weekly opening-hours template.
//!
//! A [`WorkingHours`] value always holds exactly seven days, indexed by
//! [`Weekday`]. Key-set problems (absent or unknown weekday names) can only
//! occur in the loosely keyed [`WorkingHoursDraft`] and are reported as
//! `MissingDay` / `UnknownDay` when it is validated.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::validation::{ErrorKind, FieldError, FieldErrors};
use crate::domain::value::TimeOfDay;

/// Day names as they appear in `workingHours`, keyed loosely.
pub type WorkingHoursDraft = BTreeMap<String, DayHoursDraft>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Lowercase key used in `workingHours`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    /// Exact (case-sensitive) inverse of [`Weekday::key`].
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.key() == key)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// One day of hours as submitted.
pub struct DayHoursDraft {
    pub open: String,
    pub close: String,
    pub closed: bool,
}

impl DayHoursDraft {
    pub fn open(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            closed: false,
        }
    }

    pub fn closed() -> Self {
        Self {
            open: DayHours::CLOSED_PLACEHOLDER.to_owned(),
            close: DayHours::CLOSED_PLACEHOLDER.to_owned(),
            closed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Open interval of a business day.
///
/// Invariant: `open < close`. Overnight spans are not representable.
pub struct OpeningWindow {
    open: TimeOfDay,
    close: TimeOfDay,
}

impl OpeningWindow {
    pub fn new(open: TimeOfDay, close: TimeOfDay) -> Option<Self> {
        (open < close).then_some(Self { open, close })
    }

    pub fn open(self) -> TimeOfDay {
        self.open
    }

    pub fn close(self) -> TimeOfDay {
        self.close
    }

    pub fn duration_minutes(self) -> u16 {
        self.close.minutes_since_midnight() - self.open.minutes_since_midnight()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Validated hours for one day.
pub enum DayHours {
    Open(OpeningWindow),
    /// Closed all day. The stored `open`/`close` strings are kept verbatim
    /// but carry no meaning.
    Closed { open: String, close: String },
}

impl DayHours {
    pub const OPEN_FIELD: &'static str = "open";
    pub const CLOSE_FIELD: &'static str = "close";
    const CLOSED_PLACEHOLDER: &'static str = "00:00";

    /// Closed day with placeholder times.
    pub fn closed() -> Self {
        Self::Closed {
            open: Self::CLOSED_PLACEHOLDER.to_owned(),
            close: Self::CLOSED_PLACEHOLDER.to_owned(),
        }
    }

    /// Validate a draft. Field paths in the errors are relative (`open`, `close`).
    pub fn from_draft(draft: &DayHoursDraft) -> Result<Self, FieldErrors> {
        if draft.closed {
            return Ok(Self::Closed {
                open: draft.open.clone(),
                close: draft.close.clone(),
            });
        }

        let mut errors = FieldErrors::new();
        let open = errors.take(TimeOfDay::parse(Self::OPEN_FIELD, &draft.open));
        let close = errors.take(TimeOfDay::parse(Self::CLOSE_FIELD, &draft.close));
        let (Some(open), Some(close)) = (open, close) else {
            return Err(errors);
        };
        OpeningWindow::new(open, close).map(Self::Open).ok_or_else(|| {
            FieldError::range(
                Self::CLOSE_FIELD,
                format!("closing time {close} must be later than opening time {open}"),
            )
            .into()
        })
    }

    pub fn to_draft(&self) -> DayHoursDraft {
        match self {
            Self::Open(window) => {
                DayHoursDraft::open(window.open.to_string(), window.close.to_string())
            }
            Self::Closed { open, close } => DayHoursDraft {
                open: open.clone(),
                close: close.clone(),
                closed: true,
            },
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    pub fn window(&self) -> Option<OpeningWindow> {
        match self {
            Self::Open(window) => Some(*window),
            Self::Closed { .. } => None,
        }
    }

    /// Short display text: `09:00-18:00` or `Closed`.
    pub fn summary(&self) -> String {
        match self {
            Self::Open(window) => format!("{}-{}", window.open, window.close),
            Self::Closed { .. } => "Closed".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Hours for all seven weekdays.
pub struct WorkingHours([DayHours; 7]);

impl WorkingHours {
    pub const FIELD: &'static str = "workingHours";

    pub fn from_fn(mut hours_for: impl FnMut(Weekday) -> DayHours) -> Self {
        Self(Weekday::ALL.map(&mut hours_for))
    }

    /// Validate a loosely keyed draft. Every absent weekday yields
    /// `MissingDay`, every extra key `UnknownDay`, and each present day is
    /// checked on its own. Paths are relative (`monday.open`).
    pub fn from_draft(draft: &WorkingHoursDraft) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        for key in draft.keys() {
            if Weekday::from_key(key).is_none() {
                errors.push(FieldError::new(
                    key.clone(),
                    ErrorKind::UnknownDay,
                    "not a weekday name",
                ));
            }
        }

        let mut days: [Option<DayHours>; 7] = Default::default();
        for day in Weekday::ALL {
            match draft.get(day.key()) {
                None => errors.push(FieldError::new(
                    day.key(),
                    ErrorKind::MissingDay,
                    "all seven weekdays are required",
                )),
                Some(day_draft) => match DayHours::from_draft(day_draft) {
                    Ok(hours) => days[day.index()] = Some(hours),
                    Err(day_errors) => errors.extend_within(day.key(), day_errors),
                },
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        // No errors means every weekday was present and valid.
        Ok(Self(days.map(|day| day.unwrap_or_else(DayHours::closed))))
    }

    pub fn to_draft(&self) -> WorkingHoursDraft {
        self.iter()
            .map(|(day, hours)| (day.key().to_owned(), hours.to_draft()))
            .collect()
    }

    pub fn get(&self, day: Weekday) -> &DayHours {
        &self.0[day.index()]
    }

    /// Copy with `day` replaced.
    pub fn with_day(&self, day: Weekday, hours: DayHours) -> Self {
        let mut next = self.clone();
        next.0[day.index()] = hours;
        next
    }

    /// Days paired with their hours, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayHours)> {
        Weekday::ALL.into_iter().zip(self.0.iter())
    }

    pub fn open_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.iter()
            .filter(|(_, hours)| !hours.is_closed())
            .map(|(day, _)| day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_week() -> WorkingHoursDraft {
        Weekday::ALL
            .into_iter()
            .map(|day| (day.key().to_owned(), DayHoursDraft::open("09:00", "18:00")))
            .collect()
    }

    #[test]
    fn weekday_keys_round_trip() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_key(day.key()), Some(day));
        }
        assert_eq!(Weekday::from_key("Monday"), None);
        assert_eq!(Weekday::from_key("funday"), None);
    }

    #[test]
    fn open_day_requires_open_before_close() {
        let ok = DayHours::from_draft(&DayHoursDraft::open("09:00", "18:00")).unwrap();
        assert_eq!(ok.summary(), "09:00-18:00");
        assert_eq!(ok.window().unwrap().duration_minutes(), 9 * 60);

        let inverted = DayHours::from_draft(&DayHoursDraft::open("18:00", "09:00")).unwrap_err();
        assert!(inverted.has("close", ErrorKind::RangeViolation));
        assert_eq!(inverted.len(), 1);

        let equal = DayHours::from_draft(&DayHoursDraft::open("12:00", "12:00")).unwrap_err();
        assert!(equal.has("close", ErrorKind::RangeViolation));
    }

    #[test]
    fn open_day_reports_both_bad_times() {
        let errors = DayHours::from_draft(&DayHoursDraft::open("9", "")).unwrap_err();
        assert!(errors.has("open", ErrorKind::InvalidFormat));
        assert!(errors.has("close", ErrorKind::MissingField));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn closed_day_ignores_time_strings() {
        let draft = DayHoursDraft {
            open: "whenever".to_owned(),
            close: "".to_owned(),
            closed: true,
        };
        let hours = DayHours::from_draft(&draft).unwrap();
        assert!(hours.is_closed());
        assert_eq!(hours.summary(), "Closed");
        assert_eq!(hours.to_draft(), draft);
    }

    #[test]
    fn each_missing_weekday_is_reported() {
        for day in Weekday::ALL {
            let mut draft = full_week();
            draft.remove(day.key());
            let errors = WorkingHours::from_draft(&draft).unwrap_err();
            assert!(errors.has(day.key(), ErrorKind::MissingDay));
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn extra_keys_are_reported() {
        let mut draft = full_week();
        draft.insert("holiday".to_owned(), DayHoursDraft::closed());
        let errors = WorkingHours::from_draft(&draft).unwrap_err();
        assert!(errors.has("holiday", ErrorKind::UnknownDay));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn day_errors_are_prefixed_with_the_day() {
        let mut draft = full_week();
        draft.insert("friday".to_owned(), DayHoursDraft::open("20:00", "08:00"));
        let errors = WorkingHours::from_draft(&draft).unwrap_err();
        assert!(errors.has("friday.close", ErrorKind::RangeViolation));
    }

    #[test]
    fn accessors_follow_weekday_order() {
        let mut draft = full_week();
        draft.insert("sunday".to_owned(), DayHoursDraft::closed());
        let hours = WorkingHours::from_draft(&draft).unwrap();

        assert!(hours.get(Weekday::Sunday).is_closed());
        assert_eq!(hours.open_days().count(), 6);
        assert_eq!(hours.iter().next().map(|(day, _)| day), Some(Weekday::Monday));
        assert_eq!(hours.to_draft(), draft);

        let saturday_off = hours.with_day(Weekday::Saturday, DayHours::closed());
        assert_eq!(saturday_off.open_days().count(), 5);
        assert_eq!(hours.open_days().count(), 6);
    }

    #[test]
    fn from_fn_builds_a_full_week() {
        let hours = WorkingHours::from_fn(|day| match day {
            Weekday::Saturday | Weekday::Sunday => DayHours::closed(),
            _ => DayHours::from_draft(&DayHoursDraft::open("08:00", "17:00")).unwrap(),
        });
        assert_eq!(
            hours.open_days().collect::<Vec<_>>(),
            Weekday::ALL[..5].to_vec()
        );
    }
}
