use serde::Serialize;
use serde_json::Value;

use crate::config::ModelConfig;
use crate::domain::company_fields as fields;
use crate::domain::{
    AddressDraft, AddressPatch, CompanyDetails, CompanyDetailsDraft, CompanyDetailsPatch,
    CoordinatesDraft, DayHours, DayHoursDraft, ErrorKind, FieldError, FieldErrors, Weekday,
    WorkingHours, WorkingHoursDraft,
};
use crate::transport::reader::Fields;
use crate::transport::{TransportError, finish, parse_json};

const OPEN: &str = "open";
const CLOSE: &str = "close";
const CLOSED: &str = "closed";
const LAT: &str = "lat";
const LNG: &str = "lng";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompanyDetailsDocument<'a> {
    general_phone: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    car_phone: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    home_phone: Option<Vec<&'a str>>,
    primary_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_email: Option<&'a str>,
    address: AddressDocument<'a>,
    working_hours: WeekDocument,
    map_coordinates: CoordinatesDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressDocument<'a> {
    street: &'a str,
    city: &'a str,
    state: &'a str,
    zip_code: &'a str,
    country: &'a str,
}

/// Exactly the seven weekday keys, Monday first.
#[derive(Debug, Serialize)]
struct WeekDocument {
    monday: DayHoursDocument,
    tuesday: DayHoursDocument,
    wednesday: DayHoursDocument,
    thursday: DayHoursDocument,
    friday: DayHoursDocument,
    saturday: DayHoursDocument,
    sunday: DayHoursDocument,
}

#[derive(Debug, Serialize)]
struct DayHoursDocument {
    open: String,
    close: String,
    closed: bool,
}

#[derive(Debug, Serialize)]
struct CoordinatesDocument {
    lat: f64,
    lng: f64,
}

impl From<&DayHours> for DayHoursDocument {
    fn from(value: &DayHours) -> Self {
        let draft = value.to_draft();
        Self {
            open: draft.open,
            close: draft.close,
            closed: draft.closed,
        }
    }
}

impl From<&WorkingHours> for WeekDocument {
    fn from(value: &WorkingHours) -> Self {
        let day = |day: Weekday| DayHoursDocument::from(value.get(day));
        Self {
            monday: day(Weekday::Monday),
            tuesday: day(Weekday::Tuesday),
            wednesday: day(Weekday::Wednesday),
            thursday: day(Weekday::Thursday),
            friday: day(Weekday::Friday),
            saturday: day(Weekday::Saturday),
            sunday: day(Weekday::Sunday),
        }
    }
}

impl<'a> From<&'a CompanyDetails> for CompanyDetailsDocument<'a> {
    fn from(value: &'a CompanyDetails) -> Self {
        let raw = |phones: &'a [crate::domain::PhoneNumber]| {
            phones.iter().map(|p| p.raw()).collect::<Vec<_>>()
        };
        let address = value.address();
        let coordinates = value.map_coordinates();
        Self {
            general_phone: raw(value.general_phone()),
            car_phone: value.car_phone().map(raw),
            home_phone: value.home_phone().map(raw),
            primary_email: value.primary_email().as_str(),
            secondary_email: value.secondary_email().map(|e| e.as_str()),
            address: AddressDocument {
                street: address.street(),
                city: address.city(),
                state: address.state(),
                zip_code: address.zip_code(),
                country: address.country(),
            },
            working_hours: WeekDocument::from(value.working_hours()),
            map_coordinates: CoordinatesDocument {
                lat: coordinates.lat(),
                lng: coordinates.lng(),
            },
            logo: value.logo().map(|l| l.as_str()),
        }
    }
}

pub fn encode_company_details(details: &CompanyDetails) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&CompanyDetailsDocument::from(details))?)
}

pub fn encode_company_details_value(details: &CompanyDetails) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(CompanyDetailsDocument::from(details))?)
}

pub fn decode_company_details(json: &str) -> Result<CompanyDetails, TransportError> {
    decode_company_details_with(json, &ModelConfig::default())
}

pub fn decode_company_details_with(
    json: &str,
    config: &ModelConfig,
) -> Result<CompanyDetails, TransportError> {
    let value = parse_json(json)?;
    decode_company_details_value_with(&value, config)
}

pub fn decode_company_details_value(value: &Value) -> Result<CompanyDetails, TransportError> {
    decode_company_details_value_with(value, &ModelConfig::default())
}

/// Read an untyped company document and validate it.
pub fn decode_company_details_value_with(
    value: &Value,
    config: &ModelConfig,
) -> Result<CompanyDetails, TransportError> {
    let mut errors = FieldErrors::new();
    let draft = read_company_draft(value, &mut errors);
    finish(errors, || CompanyDetails::validate_with(&draft, config))
}

/// Read a partial update. Only type errors and unknown weekday keys are
/// reported here; value checks happen in [`CompanyDetails::merge`].
pub fn decode_company_patch(json: &str) -> Result<CompanyDetailsPatch, TransportError> {
    let value = parse_json(json)?;
    decode_company_patch_value(&value)
}

pub fn decode_company_patch_value(value: &Value) -> Result<CompanyDetailsPatch, TransportError> {
    let mut errors = FieldErrors::new();
    let root = Fields::root(value, &mut errors);

    let address = root.patch_nested(fields::ADDRESS, &mut errors).map(|address| AddressPatch {
        street: address.patch_required_string(fields::STREET, &mut errors),
        city: address.patch_required_string(fields::CITY, &mut errors),
        state: address.patch_required_string(fields::STATE, &mut errors),
        zip_code: address.patch_required_string(fields::ZIP_CODE, &mut errors),
        country: address.patch_required_string(fields::COUNTRY, &mut errors),
    });

    let mut working_hours = Vec::new();
    let mut unknown_days = FieldErrors::new();
    if let Some(hours) = root.patch_nested(fields::WORKING_HOURS, &mut errors) {
        for (key, day) in hours.members(&mut errors) {
            let draft = read_day(&day, &mut errors);
            match Weekday::from_key(key) {
                Some(weekday) => working_hours.push((weekday, draft)),
                None => unknown_days.push(FieldError::new(
                    hours.path(key),
                    ErrorKind::UnknownDay,
                    "not a weekday name",
                )),
            }
        }
    }

    let patch = CompanyDetailsPatch {
        general_phone: root.patch_required_string_list(fields::GENERAL_PHONE, &mut errors),
        car_phone: root.patch_string_list(fields::CAR_PHONE, &mut errors),
        home_phone: root.patch_string_list(fields::HOME_PHONE, &mut errors),
        primary_email: root.patch_required_string(fields::PRIMARY_EMAIL, &mut errors),
        secondary_email: root.patch_string(fields::SECONDARY_EMAIL, &mut errors),
        address,
        working_hours,
        map_coordinates: root
            .patch_nested(fields::MAP_COORDINATES, &mut errors)
            .map(|coordinates| read_coordinates(&coordinates, &mut errors)),
        logo: root.patch_string(fields::LOGO, &mut errors),
    };

    finish(errors, || unknown_days.into_result(|| patch))
}

fn read_company_draft(value: &Value, errors: &mut FieldErrors) -> CompanyDetailsDraft {
    let root = Fields::root(value, errors);
    let address = root.nested(fields::ADDRESS, errors);
    let hours = root.nested(fields::WORKING_HOURS, errors);
    let coordinates = root.nested(fields::MAP_COORDINATES, errors);

    let working_hours: WorkingHoursDraft = hours
        .members(errors)
        .into_iter()
        .map(|(key, day)| (key.to_owned(), read_day(&day, errors)))
        .collect();

    CompanyDetailsDraft {
        general_phone: root.string_list(fields::GENERAL_PHONE, errors),
        car_phone: root.optional_string_list(fields::CAR_PHONE, errors),
        home_phone: root.optional_string_list(fields::HOME_PHONE, errors),
        primary_email: root.string(fields::PRIMARY_EMAIL, errors),
        secondary_email: root.optional_string(fields::SECONDARY_EMAIL, errors),
        address: AddressDraft {
            street: address.string(fields::STREET, errors),
            city: address.string(fields::CITY, errors),
            state: address.string(fields::STATE, errors),
            zip_code: address.string(fields::ZIP_CODE, errors),
            country: address.string(fields::COUNTRY, errors),
        },
        working_hours,
        map_coordinates: read_coordinates(&coordinates, errors),
        logo: root.optional_string(fields::LOGO, errors),
    }
}

/// A closed day keeps its `open`/`close` strings unchecked, so their keys are
/// required here rather than left to validation.
fn read_day(day: &Fields<'_>, errors: &mut FieldErrors) -> DayHoursDraft {
    DayHoursDraft {
        open: day.present_string(OPEN, errors),
        close: day.present_string(CLOSE, errors),
        closed: day.bool(CLOSED, errors),
    }
}

fn read_coordinates(coordinates: &Fields<'_>, errors: &mut FieldErrors) -> CoordinatesDraft {
    CoordinatesDraft {
        lat: coordinates.number(LAT, errors),
        lng: coordinates.number(LNG, errors),
    }
}
