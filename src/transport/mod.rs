//! Transport layer: JSON wire format for the three entities.
//!
//! Decoding reads untyped JSON into drafts, reports wrong primitive types as
//! [`TransportError::Malformed`], and only then runs domain validation,
//! whose failures surface as [`TransportError::Invalid`]. Encoding writes the
//! field names used on the wire (`generalPhone`, `workingHours`, ...).

mod company;
mod faq;
mod message;
mod reader;

use serde_json::Value;

use crate::domain::FieldErrors;

pub use company::{
    decode_company_details, decode_company_details_value, decode_company_details_value_with,
    decode_company_details_with, decode_company_patch, decode_company_patch_value,
    encode_company_details, encode_company_details_value,
};
pub use faq::{
    decode_faq_form, decode_faq_form_with, decode_stored_faq, decode_stored_faq_with, encode_faq,
    encode_faqs,
};
pub use message::{
    decode_contact_form, decode_contact_form_with, decode_stored_message,
    decode_stored_message_with, encode_contact_message,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The text is not JSON at all.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON with wrong primitive types (a malformed request).
    #[error("malformed payload: {0}")]
    Malformed(FieldErrors),

    /// Correct types, but values that break a business rule.
    #[error("invalid payload: {0}")]
    Invalid(FieldErrors),
}

impl TransportError {
    /// Field-level errors, for the two payload variants.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Json(_) => None,
            Self::Malformed(errors) | Self::Invalid(errors) => Some(errors),
        }
    }

    /// `true` for errors a client caused by sending the wrong shape.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Malformed(_))
    }
}

fn parse_json(json: &str) -> Result<Value, TransportError> {
    serde_json::from_str(json).map_err(|err| {
        tracing::trace!(%err, "payload is not JSON");
        TransportError::Json(err)
    })
}

/// Turn read errors plus a validation step into the final result.
///
/// Type mismatches short-circuit: validating a payload of the wrong shape
/// would only produce noise.
fn finish<T>(
    read_errors: FieldErrors,
    validate: impl FnOnce() -> Result<T, FieldErrors>,
) -> Result<T, TransportError> {
    let (mismatches, mut errors) = read_errors.partition_type_mismatches();
    if !mismatches.is_empty() {
        tracing::debug!(errors = mismatches.len(), "payload has wrong types");
        return Err(TransportError::Malformed(mismatches));
    }
    tracing::trace!(read_errors = errors.len(), "payload read, validating");
    match validate() {
        Ok(value) if errors.is_empty() => {
            tracing::trace!("payload decoded");
            Ok(value)
        }
        Ok(_) => Err(TransportError::Invalid(errors)),
        Err(rejected) => {
            // A key absent on the wire is usually reported again by validation.
            for error in rejected {
                if !errors.has(error.field(), error.kind()) {
                    errors.push(error);
                }
            }
            Err(TransportError::Invalid(errors))
        }
    }
}
