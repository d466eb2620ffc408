use serde::Serialize;
use serde_json::Value;

use crate::config::ModelConfig;
use crate::domain::message_fields as fields;
use crate::domain::{
    Clock, ContactMessage, ContactMessageInput, FieldErrors, IdSource, StoredMessage,
};
use crate::transport::reader::Fields;
use crate::transport::{TransportError, finish, parse_json};

#[derive(Debug, Serialize)]
struct ContactMessageDocument<'a> {
    id: &'a str,
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    date: String,
    status: &'static str,
}

impl<'a> From<&'a ContactMessage> for ContactMessageDocument<'a> {
    fn from(value: &'a ContactMessage) -> Self {
        Self {
            id: value.id().as_str(),
            name: value.name(),
            phone: value.phone().raw(),
            email: value.email().as_str(),
            subject: value.subject(),
            message: value.message(),
            date: value.date().to_iso_string(),
            status: value.status().as_str(),
        }
    }
}

pub fn encode_contact_message(message: &ContactMessage) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&ContactMessageDocument::from(message))?)
}

/// Decode a public contact-form submission into a new, unread message.
///
/// Any `id`, `date` or `status` in the payload is ignored; they are assigned
/// from `clock` and `ids`.
pub fn decode_contact_form(
    json: &str,
    clock: &impl Clock,
    ids: &impl IdSource,
) -> Result<ContactMessage, TransportError> {
    decode_contact_form_with(json, clock, ids, &ModelConfig::default())
}

pub fn decode_contact_form_with(
    json: &str,
    clock: &impl Clock,
    ids: &impl IdSource,
    config: &ModelConfig,
) -> Result<ContactMessage, TransportError> {
    let value = parse_json(json)?;
    let mut errors = FieldErrors::new();
    let root = Fields::root(&value, &mut errors);
    let input = read_input(&root, &mut errors);
    finish(errors, || ContactMessage::create_with(&input, clock, ids, config))
}

pub fn decode_stored_message(json: &str) -> Result<ContactMessage, TransportError> {
    decode_stored_message_with(json, &ModelConfig::default())
}

/// Decode a message document as written by [`encode_contact_message`].
pub fn decode_stored_message_with(
    json: &str,
    config: &ModelConfig,
) -> Result<ContactMessage, TransportError> {
    let value: Value = parse_json(json)?;
    let mut errors = FieldErrors::new();
    let root = Fields::root(&value, &mut errors);
    let stored = StoredMessage {
        id: root.string(fields::ID, &mut errors),
        date: root.string(fields::DATE, &mut errors),
        status: root.string(fields::STATUS, &mut errors),
        content: read_input(&root, &mut errors),
    };
    finish(errors, || ContactMessage::restore_with(&stored, config))
}

fn read_input(root: &Fields<'_>, errors: &mut FieldErrors) -> ContactMessageInput {
    ContactMessageInput {
        name: root.string(fields::NAME, errors),
        phone: root.string(fields::PHONE, errors),
        email: root.string(fields::EMAIL, errors),
        subject: root.string(fields::SUBJECT, errors),
        message: root.string(fields::MESSAGE, errors),
    }
}
