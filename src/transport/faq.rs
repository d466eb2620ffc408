use serde::Serialize;

use crate::config::ModelConfig;
use crate::domain::faq_fields as fields;
use crate::domain::{Faq, FaqInput, FieldErrors, IdSource};
use crate::transport::reader::Fields;
use crate::transport::{TransportError, finish, parse_json};

#[derive(Debug, Serialize)]
struct FaqDocument<'a> {
    id: &'a str,
    question: &'a str,
    answer: &'a str,
}

impl<'a> From<&'a Faq> for FaqDocument<'a> {
    fn from(value: &'a Faq) -> Self {
        Self {
            id: value.id().as_str(),
            question: value.question(),
            answer: value.answer(),
        }
    }
}

pub fn encode_faq(faq: &Faq) -> Result<String, TransportError> {
    Ok(serde_json::to_string(&FaqDocument::from(faq))?)
}

/// Encode an ordered list of entries as a JSON array, preserving order.
pub fn encode_faqs(faqs: &[Faq]) -> Result<String, TransportError> {
    let documents: Vec<FaqDocument<'_>> = faqs.iter().map(FaqDocument::from).collect();
    Ok(serde_json::to_string(&documents)?)
}

pub fn decode_faq_form(json: &str, ids: &impl IdSource) -> Result<Faq, TransportError> {
    decode_faq_form_with(json, ids, &ModelConfig::default())
}

/// Decode a new entry from the admin surface and assign it an id.
pub fn decode_faq_form_with(
    json: &str,
    ids: &impl IdSource,
    config: &ModelConfig,
) -> Result<Faq, TransportError> {
    let value = parse_json(json)?;
    let mut errors = FieldErrors::new();
    let root = Fields::root(&value, &mut errors);
    let input = read_input(&root, &mut errors);
    finish(errors, || Faq::create_with(&input, ids, config))
}

pub fn decode_stored_faq(json: &str) -> Result<Faq, TransportError> {
    decode_stored_faq_with(json, &ModelConfig::default())
}

pub fn decode_stored_faq_with(json: &str, config: &ModelConfig) -> Result<Faq, TransportError> {
    let value = parse_json(json)?;
    let mut errors = FieldErrors::new();
    let root = Fields::root(&value, &mut errors);
    let id = root.string(fields::ID, &mut errors);
    let input = read_input(&root, &mut errors);
    finish(errors, || Faq::restore_with(&id, &input, config))
}

fn read_input(root: &Fields<'_>, errors: &mut FieldErrors) -> FaqInput {
    FaqInput {
        question: root.string(fields::QUESTION, errors),
        answer: root.string(fields::ANSWER, errors),
    }
}
