//! Domain layer: strong types with validation and invariants (no I/O).

pub mod check;
mod company;
mod faq;
mod hours;
mod message;
mod validation;
mod value;

pub use check::{
    is_valid_email, is_valid_iso_date, is_valid_lat_lng, is_valid_phone, is_valid_time_of_day,
};
pub use company::{
    Address, AddressDraft, AddressPatch, CompanyDetails, CompanyDetailsDraft, CompanyDetailsPatch,
    CoordinatesDraft,
};
pub use faq::{Faq, FaqInput};
pub use hours::{DayHours, DayHoursDraft, OpeningWindow, Weekday, WorkingHours, WorkingHoursDraft};
pub use message::{
    Clock, ContactMessage, ContactMessageInput, IdSource, MessageStatus, StoredMessage,
    SystemClock, UuidIdSource, sort_newest_first, unread_count,
};
pub use validation::{ErrorKind, FieldError, FieldErrors};
pub use value::{
    Coordinates, EmailAddress, FaqId, LogoRef, MessageId, PhoneNumber, RequiredText, TimeOfDay,
    Timestamp,
};

pub(crate) use company::fields as company_fields;
pub(crate) use faq::fields as faq_fields;
pub(crate) use message::fields as message_fields;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_unique_and_non_empty() {
        let ids = UuidIdSource;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(MessageId::new(a).is_ok());
    }

    #[test]
    fn system_clock_is_current() {
        let before = chrono::Utc::now() - chrono::TimeDelta::milliseconds(1);
        let now = SystemClock.now().value();
        assert!(now >= before);
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn validators_fail_closed_on_garbage() {
        let garbage = ["", " ", "\u{0}", "💥", "::", "@", "99:99"];
        for input in garbage {
            assert!(!is_valid_email(input));
            assert!(!is_valid_time_of_day(input));
            assert!(!is_valid_iso_date(input));
        }
        assert!(!is_valid_phone(""));
        assert!(!is_valid_lat_lng(f64::INFINITY, 0.0));
    }

    #[test]
    fn day_hours_from_validated_parts() {
        let open = TimeOfDay::new(8, 30).unwrap();
        let close = TimeOfDay::new(17, 0).unwrap();
        let window = OpeningWindow::new(open, close).unwrap();
        assert_eq!(DayHours::Open(window).summary(), "08:30-17:00");
        assert!(OpeningWindow::new(close, open).is_none());
    }
}
