use bizinfo::domain::{
    AddressDraft, CoordinatesDraft, EmailAddress, Timestamp, WorkingHoursDraft, is_valid_lat_lng,
};
use bizinfo::transport::{
    decode_company_details, decode_company_details_value, decode_contact_form, decode_faq_form,
    encode_company_details, encode_company_details_value,
};
use bizinfo::{
    CompanyDetails, CompanyDetailsDraft, CompanyDetailsPatch, ContactMessage, ContactMessageInput,
    DayHoursDraft, ErrorKind, Faq, FaqInput, ModelConfig, TransportError, Weekday,
};
use chrono::{TimeZone, Utc};

fn week(hours: DayHoursDraft) -> WorkingHoursDraft {
    Weekday::ALL
        .into_iter()
        .map(|day| (day.key().to_owned(), hours.clone()))
        .collect()
}

fn company(working_hours: WorkingHoursDraft) -> CompanyDetailsDraft {
    CompanyDetailsDraft {
        general_phone: vec!["+1 212 555 0100".to_owned(), "(212) 555-0101".to_owned()],
        car_phone: Some(vec!["+1 917 555 0102".to_owned()]),
        home_phone: None,
        primary_email: "hello@bakery.example".to_owned(),
        secondary_email: Some("orders@bakery.example".to_owned()),
        address: AddressDraft {
            street: "221 Baker St".to_owned(),
            city: "Springfield".to_owned(),
            state: "IL".to_owned(),
            zip_code: "62701".to_owned(),
            country: "United States".to_owned(),
        },
        working_hours,
        map_coordinates: CoordinatesDraft {
            lat: 39.7817,
            lng: -89.6501,
        },
        logo: Some("https://cdn.bakery.example/logo.svg".to_owned()),
    }
}

fn message_input() -> ContactMessageInput {
    ContactMessageInput {
        name: "Linus".to_owned(),
        phone: "+46 8 123 456".to_owned(),
        email: "linus@example.se".to_owned(),
        subject: "Catering".to_owned(),
        message: "Do you cater weddings?".to_owned(),
    }
}

fn clock() -> impl bizinfo::domain::Clock {
    || Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
}

#[test]
fn every_weekday_is_required() {
    for day in Weekday::ALL {
        let mut hours = week(DayHoursDraft::open("09:00", "18:00"));
        hours.remove(day.key());
        let errors = CompanyDetails::validate(&company(hours)).unwrap_err();
        let field = format!("workingHours.{day}");
        assert!(errors.has(&field, ErrorKind::MissingDay), "{day} not reported");
    }
}

#[test]
fn extra_weekday_keys_are_rejected() {
    let mut hours = week(DayHoursDraft::open("09:00", "18:00"));
    hours.insert("Monday".to_owned(), DayHoursDraft::closed());
    let errors = CompanyDetails::validate(&company(hours)).unwrap_err();
    assert!(errors.has("workingHours.Monday", ErrorKind::UnknownDay));
}

#[test]
fn open_days_need_ordered_well_formed_times() {
    let accepted = week(DayHoursDraft::open("09:00", "18:00"));
    assert!(CompanyDetails::validate(&company(accepted)).is_ok());

    let inverted = week(DayHoursDraft::open("18:00", "09:00"));
    let errors = CompanyDetails::validate(&company(inverted)).unwrap_err();
    for day in Weekday::ALL {
        assert!(errors.has(&format!("workingHours.{day}.close"), ErrorKind::RangeViolation));
    }

    let malformed = week(DayHoursDraft::open("9:00", "18:00"));
    let errors = CompanyDetails::validate(&company(malformed)).unwrap_err();
    assert!(errors.has("workingHours.monday.open", ErrorKind::InvalidFormat));
}

#[test]
fn closed_days_ignore_their_times() {
    for (open, close) in [("18:00", "09:00"), ("", ""), ("closed", "all day"), ("12:00", "12:00")] {
        let hours = week(DayHoursDraft {
            open: open.to_owned(),
            close: close.to_owned(),
            closed: true,
        });
        assert!(CompanyDetails::validate(&company(hours)).is_ok());
    }
}

#[test]
fn closed_days_still_need_open_and_close_on_the_wire() {
    let details = CompanyDetails::validate(&company(week(DayHoursDraft::closed()))).unwrap();
    let mut doc = encode_company_details_value(&details).unwrap();

    doc["workingHours"]["sunday"]["close"] = serde_json::Value::Null;
    let err = decode_company_details_value(&doc).unwrap_err();
    assert!(err.is_malformed());
    let errors = err.field_errors().unwrap();
    assert!(errors.has("workingHours.sunday.close", ErrorKind::TypeMismatch));

    doc["workingHours"]["sunday"] = serde_json::json!({ "closed": true });
    let err = decode_company_details_value(&doc).unwrap_err();
    assert!(matches!(err, TransportError::Invalid(_)));
    let errors = err.field_errors().unwrap();
    assert!(errors.has("workingHours.sunday.open", ErrorKind::MissingField));
    assert!(errors.has("workingHours.sunday.close", ErrorKind::MissingField));
}

#[test]
fn coordinates_are_range_checked() {
    assert!(is_valid_lat_lng(40.7128, -74.0060));
    assert!(!is_valid_lat_lng(91.0, 0.0));

    let mut draft = company(week(DayHoursDraft::open("09:00", "18:00")));
    draft.map_coordinates = CoordinatesDraft { lat: 91.0, lng: 0.0 };
    let errors = CompanyDetails::validate(&draft).unwrap_err();
    assert!(errors.has("mapCoordinates.lat", ErrorKind::RangeViolation));
    assert_eq!(errors.len(), 1);
}

#[test]
fn missing_email_yields_a_single_error() {
    let mut input = message_input();
    input.email = String::new();
    let errors = ContactMessage::create(&input, &clock(), &|| "id-1".to_owned()).unwrap_err();
    assert_eq!(errors.len(), 1);
    let only = errors.iter().next().unwrap();
    assert_eq!(only.field(), "email");
    assert_eq!(only.kind(), ErrorKind::MissingField);
}

#[test]
fn mark_read_is_idempotent() {
    let message = ContactMessage::create(&message_input(), &clock(), &|| "id-1".to_owned()).unwrap();
    let once = message.clone().mark_read();
    assert_eq!(once.clone().mark_read(), once);
    assert_ne!(once, message);
}

#[test]
fn company_details_round_trip_through_json() {
    let variants = [
        company(week(DayHoursDraft::open("09:00", "18:00"))),
        {
            let mut draft = company(week(DayHoursDraft::closed()));
            draft.car_phone = None;
            draft.secondary_email = None;
            draft.logo = Some("assets/logo.png".to_owned());
            draft.map_coordinates = CoordinatesDraft {
                lat: -33.868820,
                lng: 151.209290,
            };
            draft
        },
    ];
    for draft in variants {
        let details = CompanyDetails::validate(&draft).unwrap();
        let json = encode_company_details(&details).unwrap();
        assert_eq!(decode_company_details(&json).unwrap(), details);
    }
}

#[test]
fn faq_requires_question_and_answer_independently() {
    let ids = || "faq-1".to_owned();
    for (question, answer, field) in [("", "Yes", "question"), ("Open late?", "", "answer")] {
        let input = FaqInput {
            question: question.to_owned(),
            answer: answer.to_owned(),
        };
        let errors = Faq::create(&input, &ids).unwrap_err();
        assert!(errors.has(field, ErrorKind::MissingField));
        assert_eq!(errors.len(), 1);
    }
}

#[test]
fn merge_only_revalidates_what_it_touches() {
    let existing =
        CompanyDetails::validate(&company(week(DayHoursDraft::open("09:00", "18:00")))).unwrap();
    let patch = CompanyDetailsPatch {
        primary_email: Some("owner@bakery.example".to_owned()),
        working_hours: vec![(Weekday::Sunday, DayHoursDraft::closed())],
        ..Default::default()
    };
    let merged = CompanyDetails::merge(&existing, patch).unwrap();
    assert_eq!(
        merged.primary_email(),
        &EmailAddress::parse("primaryEmail", "owner@bakery.example").unwrap()
    );
    assert!(merged.working_hours().get(Weekday::Sunday).is_closed());
    assert_eq!(merged.address(), existing.address());
    assert!(CompanyDetails::validate(&merged.to_draft()).is_ok());
}

#[test]
fn strict_phone_region_is_applied_through_config() {
    let config = ModelConfig::builder()
        .phone_region(phonenumber::country::Id::US)
        .build();
    let mut draft = company(week(DayHoursDraft::open("09:00", "18:00")));
    draft.general_phone = vec!["12".to_owned()];
    let errors = CompanyDetails::validate_with(&draft, &config).unwrap_err();
    assert!(errors.has("generalPhone[0]", ErrorKind::InvalidFormat));
}

#[test]
fn boundary_separates_malformed_from_invalid() {
    let ids = || "x".to_owned();

    let malformed = decode_faq_form(r#"{ "question": 1, "answer": "a" }"#, &ids).unwrap_err();
    assert!(matches!(malformed, TransportError::Malformed(_)));

    let invalid = decode_contact_form(
        r#"{ "name": "A", "phone": "1", "email": "nope", "subject": "S", "message": "M" }"#,
        &clock(),
        &ids,
    )
    .unwrap_err();
    assert!(matches!(invalid, TransportError::Invalid(_)));
}
