use crate::config::ModelConfig;
use crate::domain::message::IdSource;
use crate::domain::validation::FieldErrors;
use crate::domain::value::{FaqId, RequiredText};

pub(crate) mod fields {
    pub const ID: &str = "id";
    pub const QUESTION: &str = "question";
    pub const ANSWER: &str = "answer";
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaqInput {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A published question and its answer.
pub struct Faq {
    id: FaqId,
    question: RequiredText,
    answer: RequiredText,
}

fn content(
    input: &FaqInput,
    config: &ModelConfig,
    errors: &mut FieldErrors,
) -> Option<(RequiredText, RequiredText)> {
    let question = errors.take(RequiredText::line(fields::QUESTION, &input.question, config));
    let answer = errors.take(RequiredText::body(fields::ANSWER, &input.answer, config));
    Some((question?, answer?))
}

impl Faq {
    pub fn create(input: &FaqInput, ids: &impl IdSource) -> Result<Self, FieldErrors> {
        Self::create_with(input, ids, &ModelConfig::default())
    }

    /// Validate `input` and assign a fresh id.
    pub fn create_with(
        input: &FaqInput,
        ids: &impl IdSource,
        config: &ModelConfig,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let Some((question, answer)) = content(input, config, &mut errors) else {
            tracing::debug!(errors = errors.len(), "faq rejected");
            return Err(errors);
        };
        Ok(Self {
            id: FaqId::new(ids.next_id())?,
            question,
            answer,
        })
    }

    /// Replace question and answer wholesale; the id is kept.
    pub fn update(&self, input: &FaqInput) -> Result<Self, FieldErrors> {
        self.update_with(input, &ModelConfig::default())
    }

    pub fn update_with(&self, input: &FaqInput, config: &ModelConfig) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let (question, answer) = content(input, config, &mut errors).ok_or(errors)?;
        Ok(Self {
            id: self.id.clone(),
            question,
            answer,
        })
    }

    /// Re-validate a stored entry under its existing id.
    pub fn restore(id: &str, input: &FaqInput) -> Result<Self, FieldErrors> {
        Self::restore_with(id, input, &ModelConfig::default())
    }

    pub fn restore_with(id: &str, input: &FaqInput, config: &ModelConfig) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = errors.take(FaqId::new(id));
        let content = content(input, config, &mut errors);
        match (id, content) {
            (Some(id), Some((question, answer))) => Ok(Self {
                id,
                question,
                answer,
            }),
            _ => Err(errors),
        }
    }

    pub fn id(&self) -> &FaqId {
        &self.id
    }

    pub fn question(&self) -> &str {
        self.question.as_str()
    }

    pub fn answer(&self) -> &str {
        self.answer.as_str()
    }
}
