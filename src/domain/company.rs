//! Company contact and location record.
//!
//! # Invariants
//! - At least one general phone number.
//! - Primary email present; secondary email optional.
//! - All five address parts present.
//! - Working hours cover exactly the seven weekdays; an open day has
//!   `open < close`.
//! - Coordinates within latitude/longitude bounds.
//!
//! Optional values are `None` when not provided, never empty strings.

use crate::config::ModelConfig;
use crate::domain::hours::{DayHours, DayHoursDraft, Weekday, WorkingHours, WorkingHoursDraft};
use crate::domain::validation::{FieldError, FieldErrors};
use crate::domain::value::{Coordinates, EmailAddress, LogoRef, PhoneNumber, RequiredText};

pub(crate) mod fields {
    pub const GENERAL_PHONE: &str = "generalPhone";
    pub const CAR_PHONE: &str = "carPhone";
    pub const HOME_PHONE: &str = "homePhone";
    pub const PRIMARY_EMAIL: &str = "primaryEmail";
    pub const SECONDARY_EMAIL: &str = "secondaryEmail";
    pub const ADDRESS: &str = "address";
    pub const WORKING_HOURS: &str = "workingHours";
    pub const MAP_COORDINATES: &str = "mapCoordinates";
    pub const LOGO: &str = "logo";

    pub const STREET: &str = "street";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";
    pub const ZIP_CODE: &str = "zipCode";
    pub const COUNTRY: &str = "country";
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Postal address as submitted.
pub struct AddressDraft {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated postal address; every part is non-empty.
pub struct Address {
    street: RequiredText,
    city: RequiredText,
    state: RequiredText,
    zip_code: RequiredText,
    country: RequiredText,
}

impl Address {
    /// Validate all parts. Paths are relative (`zipCode`).
    pub fn from_draft(draft: &AddressDraft, config: &ModelConfig) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let street = errors.take(RequiredText::line(fields::STREET, &draft.street, config));
        let city = errors.take(RequiredText::line(fields::CITY, &draft.city, config));
        let state = errors.take(RequiredText::line(fields::STATE, &draft.state, config));
        let zip_code = errors.take(RequiredText::line(fields::ZIP_CODE, &draft.zip_code, config));
        let country = errors.take(RequiredText::line(fields::COUNTRY, &draft.country, config));

        match (street, city, state, zip_code, country) {
            (Some(street), Some(city), Some(state), Some(zip_code), Some(country)) => Ok(Self {
                street,
                city,
                state,
                zip_code,
                country,
            }),
            _ => Err(errors),
        }
    }

    pub fn to_draft(&self) -> AddressDraft {
        AddressDraft {
            street: self.street.as_str().to_owned(),
            city: self.city.as_str().to_owned(),
            state: self.state.as_str().to_owned(),
            zip_code: self.zip_code.as_str().to_owned(),
            country: self.country.as_str().to_owned(),
        }
    }

    pub fn street(&self) -> &str {
        self.street.as_str()
    }

    pub fn city(&self) -> &str {
        self.city.as_str()
    }

    pub fn state(&self) -> &str {
        self.state.as_str()
    }

    pub fn zip_code(&self) -> &str {
        self.zip_code.as_str()
    }

    pub fn country(&self) -> &str {
        self.country.as_str()
    }

    /// Single-line form: `street, city, state zip, country`.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.zip_code, self.country
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinatesDraft {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Candidate company record, typically straight from an admin form.
pub struct CompanyDetailsDraft {
    pub general_phone: Vec<String>,
    pub car_phone: Option<Vec<String>>,
    pub home_phone: Option<Vec<String>>,
    pub primary_email: String,
    pub secondary_email: Option<String>,
    pub address: AddressDraft,
    pub working_hours: WorkingHoursDraft,
    pub map_coordinates: CoordinatesDraft,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// Partial update of an [`Address`]; `None` keeps the current part.
pub struct AddressPatch {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl AddressPatch {
    fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.country.is_none()
    }
}

#[derive(Debug, Clone, Default)]
/// Partial update of a [`CompanyDetails`] record.
///
/// `None` leaves a field untouched. For optional fields `Some(None)` clears
/// the value.
pub struct CompanyDetailsPatch {
    pub general_phone: Option<Vec<String>>,
    pub car_phone: Option<Option<Vec<String>>>,
    pub home_phone: Option<Option<Vec<String>>>,
    pub primary_email: Option<String>,
    pub secondary_email: Option<Option<String>>,
    pub address: Option<AddressPatch>,
    pub working_hours: Vec<(Weekday, DayHoursDraft)>,
    pub map_coordinates: Option<CoordinatesDraft>,
    pub logo: Option<Option<String>>,
}

impl CompanyDetailsPatch {
    pub fn is_empty(&self) -> bool {
        self.general_phone.is_none()
            && self.car_phone.is_none()
            && self.home_phone.is_none()
            && self.primary_email.is_none()
            && self.secondary_email.is_none()
            && self.address.as_ref().is_none_or(AddressPatch::is_empty)
            && self.working_hours.is_empty()
            && self.map_coordinates.is_none()
            && self.logo.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Validated company record. There is one per deployment.
pub struct CompanyDetails {
    general_phone: Vec<PhoneNumber>,
    car_phone: Option<Vec<PhoneNumber>>,
    home_phone: Option<Vec<PhoneNumber>>,
    primary_email: EmailAddress,
    secondary_email: Option<EmailAddress>,
    address: Address,
    working_hours: WorkingHours,
    map_coordinates: Coordinates,
    logo: Option<LogoRef>,
}

impl CompanyDetails {
    /// Validate a candidate with the default [`ModelConfig`].
    pub fn validate(draft: &CompanyDetailsDraft) -> Result<Self, FieldErrors> {
        Self::validate_with(draft, &ModelConfig::default())
    }

    /// Validate every field of `draft`, collecting all violations.
    pub fn validate_with(
        draft: &CompanyDetailsDraft,
        config: &ModelConfig,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let general_phone = errors.take(required_phones(
            fields::GENERAL_PHONE,
            &draft.general_phone,
            config,
        ));
        let car_phone = errors.take(optional_phones(
            fields::CAR_PHONE,
            draft.car_phone.as_deref(),
            config,
        ));
        let home_phone = errors.take(optional_phones(
            fields::HOME_PHONE,
            draft.home_phone.as_deref(),
            config,
        ));
        let primary_email = errors.take(EmailAddress::parse(
            fields::PRIMARY_EMAIL,
            &draft.primary_email,
        ));
        let secondary_email = errors.take(optional_email(
            fields::SECONDARY_EMAIL,
            draft.secondary_email.as_deref(),
        ));
        let address = errors.take(nested(
            fields::ADDRESS,
            Address::from_draft(&draft.address, config),
        ));
        let working_hours = errors.take(nested(
            fields::WORKING_HOURS,
            WorkingHours::from_draft(&draft.working_hours),
        ));
        let map_coordinates = errors.take(coordinates(draft.map_coordinates));
        let logo = errors.take(optional_logo(draft.logo.as_deref(), config));

        let (
            Some(general_phone),
            Some(car_phone),
            Some(home_phone),
            Some(primary_email),
            Some(secondary_email),
            Some(address),
            Some(working_hours),
            Some(map_coordinates),
            Some(logo),
        ) = (
            general_phone,
            car_phone,
            home_phone,
            primary_email,
            secondary_email,
            address,
            working_hours,
            map_coordinates,
            logo,
        )
        else {
            tracing::debug!(errors = errors.len(), "company details rejected");
            return Err(errors);
        };

        Ok(Self {
            general_phone,
            car_phone,
            home_phone,
            primary_email,
            secondary_email,
            address,
            working_hours,
            map_coordinates,
            logo,
        })
    }

    /// Apply `patch` over `existing` with the default [`ModelConfig`].
    pub fn merge(existing: &Self, patch: CompanyDetailsPatch) -> Result<Self, FieldErrors> {
        Self::merge_with(existing, patch, &ModelConfig::default())
    }

    /// Apply `patch` over `existing`, validating only the parts it touches.
    ///
    /// `existing` is left as is; the merged record is returned. Because the
    /// untouched parts come from an already validated record, the result
    /// satisfies every invariant checked by [`CompanyDetails::validate`].
    pub fn merge_with(
        existing: &Self,
        patch: CompanyDetailsPatch,
        config: &ModelConfig,
    ) -> Result<Self, FieldErrors> {
        let mut next = existing.clone();
        let mut errors = FieldErrors::new();
        let mut touched = Vec::new();

        if let Some(phones) = patch.general_phone {
            touched.push(fields::GENERAL_PHONE);
            if let Some(phones) =
                errors.take(required_phones(fields::GENERAL_PHONE, &phones, config))
            {
                next.general_phone = phones;
            }
        }
        if let Some(phones) = patch.car_phone {
            touched.push(fields::CAR_PHONE);
            if let Some(phones) =
                errors.take(optional_phones(fields::CAR_PHONE, phones.as_deref(), config))
            {
                next.car_phone = phones;
            }
        }
        if let Some(phones) = patch.home_phone {
            touched.push(fields::HOME_PHONE);
            if let Some(phones) =
                errors.take(optional_phones(fields::HOME_PHONE, phones.as_deref(), config))
            {
                next.home_phone = phones;
            }
        }
        if let Some(email) = patch.primary_email {
            touched.push(fields::PRIMARY_EMAIL);
            if let Some(email) = errors.take(EmailAddress::parse(fields::PRIMARY_EMAIL, &email)) {
                next.primary_email = email;
            }
        }
        if let Some(email) = patch.secondary_email {
            touched.push(fields::SECONDARY_EMAIL);
            if let Some(email) =
                errors.take(optional_email(fields::SECONDARY_EMAIL, email.as_deref()))
            {
                next.secondary_email = email;
            }
        }
        if let Some(address) = patch.address.filter(|a| !a.is_empty()) {
            touched.push(fields::ADDRESS);
            if let Some(address) = errors.take(nested(
                fields::ADDRESS,
                merge_address(&existing.address, address, config),
            )) {
                next.address = address;
            }
        }
        if !patch.working_hours.is_empty() {
            touched.push(fields::WORKING_HOURS);
            for (day, draft) in patch.working_hours {
                let path = format!("{}.{}", fields::WORKING_HOURS, day.key());
                match DayHours::from_draft(&draft) {
                    Ok(hours) => next.working_hours = next.working_hours.with_day(day, hours),
                    Err(day_errors) => errors.extend_within(&path, day_errors),
                }
            }
        }
        if let Some(draft) = patch.map_coordinates {
            touched.push(fields::MAP_COORDINATES);
            if let Some(map_coordinates) = errors.take(coordinates(draft)) {
                next.map_coordinates = map_coordinates;
            }
        }
        if let Some(logo) = patch.logo {
            touched.push(fields::LOGO);
            if let Some(logo) = errors.take(optional_logo(logo.as_deref(), config)) {
                next.logo = logo;
            }
        }

        tracing::debug!(?touched, errors = errors.len(), "merging company details");
        errors.into_result(|| next)
    }

    /// Inverse of [`CompanyDetails::validate`], e.g. to prefill an edit form.
    pub fn to_draft(&self) -> CompanyDetailsDraft {
        let raw = |phones: &[PhoneNumber]| {
            phones
                .iter()
                .map(|p| p.raw().to_owned())
                .collect::<Vec<_>>()
        };
        CompanyDetailsDraft {
            general_phone: raw(&self.general_phone),
            car_phone: self.car_phone.as_deref().map(raw),
            home_phone: self.home_phone.as_deref().map(raw),
            primary_email: self.primary_email.as_str().to_owned(),
            secondary_email: self.secondary_email.as_ref().map(|e| e.as_str().to_owned()),
            address: self.address.to_draft(),
            working_hours: self.working_hours.to_draft(),
            map_coordinates: CoordinatesDraft {
                lat: self.map_coordinates.lat(),
                lng: self.map_coordinates.lng(),
            },
            logo: self.logo.as_ref().map(|l| l.as_str().to_owned()),
        }
    }

    /// General numbers, never empty.
    pub fn general_phone(&self) -> &[PhoneNumber] {
        &self.general_phone
    }

    pub fn car_phone(&self) -> Option<&[PhoneNumber]> {
        self.car_phone.as_deref()
    }

    pub fn home_phone(&self) -> Option<&[PhoneNumber]> {
        self.home_phone.as_deref()
    }

    pub fn primary_email(&self) -> &EmailAddress {
        &self.primary_email
    }

    pub fn secondary_email(&self) -> Option<&EmailAddress> {
        self.secondary_email.as_ref()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn working_hours(&self) -> &WorkingHours {
        &self.working_hours
    }

    pub fn map_coordinates(&self) -> Coordinates {
        self.map_coordinates
    }

    pub fn logo(&self) -> Option<&LogoRef> {
        self.logo.as_ref()
    }
}

fn nested<T>(parent: &str, result: Result<T, FieldErrors>) -> Result<T, FieldErrors> {
    result.map_err(|errors| {
        let mut prefixed = FieldErrors::new();
        prefixed.extend_within(parent, errors);
        prefixed
    })
}

fn phone_list(
    field: &str,
    values: &[String],
    config: &ModelConfig,
) -> Result<Vec<PhoneNumber>, FieldErrors> {
    let mut errors = FieldErrors::new();
    let phones = values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            errors.take(
                PhoneNumber::parse(&format!("[{idx}]"), value, config).map_err(|e| e.within(field)),
            )
        })
        .collect::<Vec<_>>();
    errors.into_result(|| phones)
}

fn required_phones(
    field: &str,
    values: &[String],
    config: &ModelConfig,
) -> Result<Vec<PhoneNumber>, FieldErrors> {
    if values.is_empty() {
        return Err(FieldError::missing(field).into());
    }
    phone_list(field, values, config)
}

fn optional_phones(
    field: &str,
    values: Option<&[String]>,
    config: &ModelConfig,
) -> Result<Option<Vec<PhoneNumber>>, FieldErrors> {
    values
        .map(|values| phone_list(field, values, config))
        .transpose()
}

fn optional_email(field: &str, value: Option<&str>) -> Result<Option<EmailAddress>, FieldErrors> {
    value
        .map(|value| EmailAddress::parse(field, value).map_err(FieldErrors::from))
        .transpose()
}

fn optional_logo(value: Option<&str>, config: &ModelConfig) -> Result<Option<LogoRef>, FieldErrors> {
    value
        .map(|value| LogoRef::parse(fields::LOGO, value, config).map_err(FieldErrors::from))
        .transpose()
}

fn coordinates(draft: CoordinatesDraft) -> Result<Coordinates, FieldErrors> {
    Coordinates::new(draft.lat, draft.lng).map_err(|errors| {
        let mut prefixed = FieldErrors::new();
        for error in errors {
            prefixed.push(error.within(fields::MAP_COORDINATES));
        }
        prefixed
    })
}

fn merge_address(
    existing: &Address,
    patch: AddressPatch,
    config: &ModelConfig,
) -> Result<Address, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut next = existing.clone();
    let parts = [
        (fields::STREET, patch.street, &mut next.street),
        (fields::CITY, patch.city, &mut next.city),
        (fields::STATE, patch.state, &mut next.state),
        (fields::ZIP_CODE, patch.zip_code, &mut next.zip_code),
        (fields::COUNTRY, patch.country, &mut next.country),
    ];
    for (field, value, slot) in parts {
        if let Some(value) = value {
            if let Some(text) = errors.take(RequiredText::line(field, &value, config)) {
                *slot = text;
            }
        }
    }
    errors.into_result(|| next)
}
