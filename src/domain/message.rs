//! Inbound contact-form messages.
//!
//! # Invariants
//! - `id` and `date` are assigned once, at creation, and never change.
//! - New messages are `Unread`; the only transition is `Unread -> Read`.

use std::cmp::Reverse;

use chrono::Utc;

use crate::config::ModelConfig;
use crate::domain::validation::{FieldError, FieldErrors};
use crate::domain::value::{EmailAddress, MessageId, PhoneNumber, RequiredText, Timestamp};

pub(crate) mod fields {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const SUBJECT: &str = "subject";
    pub const MESSAGE: &str = "message";
    pub const DATE: &str = "date";
    pub const STATUS: &str = "status";
}

/// Source of "now" for newly created records.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Source of fresh identifiers. Uniqueness is the implementor's concern.
pub trait IdSource {
    fn next_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(Utc::now())
    }
}

impl<F> Clock for F
where
    F: Fn() -> Timestamp,
{
    fn now(&self) -> Timestamp {
        self()
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Random (v4) UUIDs.
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

impl<F> IdSource for F
where
    F: Fn() -> String,
{
    fn next_id(&self) -> String {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Read state of a message. Two states, one edge: `Unread -> Read`.
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }

    /// Exact, case-sensitive match on the stored name.
    pub fn parse(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "" => Err(FieldError::missing(field)),
            _ => Err(FieldError::invalid_format(field, "\"read\" or \"unread\"")),
        }
    }

    /// The single allowed transition. `Read` stays `Read`.
    pub fn mark_read(self) -> Self {
        Self::Read
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Raw contact-form submission.
pub struct ContactMessageInput {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// A message as read back from storage, before re-validation.
pub struct StoredMessage {
    pub id: String,
    pub date: String,
    pub status: String,
    pub content: ContactMessageInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    id: MessageId,
    name: RequiredText,
    phone: PhoneNumber,
    email: EmailAddress,
    subject: RequiredText,
    message: RequiredText,
    date: Timestamp,
    status: MessageStatus,
}

struct Content {
    name: RequiredText,
    phone: PhoneNumber,
    email: EmailAddress,
    subject: RequiredText,
    message: RequiredText,
}

fn content(
    input: &ContactMessageInput,
    config: &ModelConfig,
    errors: &mut FieldErrors,
) -> Option<Content> {
    let name = errors.take(RequiredText::line(fields::NAME, &input.name, config));
    let phone = errors.take(PhoneNumber::parse(fields::PHONE, &input.phone, config));
    let email = errors.take(EmailAddress::parse(fields::EMAIL, &input.email));
    let subject = errors.take(RequiredText::line(fields::SUBJECT, &input.subject, config));
    let message = errors.take(RequiredText::body(fields::MESSAGE, &input.message, config));
    Some(Content {
        name: name?,
        phone: phone?,
        email: email?,
        subject: subject?,
        message: message?,
    })
}

impl ContactMessage {
    /// Validate a submission with the default [`ModelConfig`].
    pub fn create(
        input: &ContactMessageInput,
        clock: &impl Clock,
        ids: &impl IdSource,
    ) -> Result<Self, FieldErrors> {
        Self::create_with(input, clock, ids, &ModelConfig::default())
    }

    /// Validate a submission and stamp it with a fresh id and the current time.
    ///
    /// The message starts out `Unread`. The id source and clock are only
    /// consulted once the content is valid.
    pub fn create_with(
        input: &ContactMessageInput,
        clock: &impl Clock,
        ids: &impl IdSource,
        config: &ModelConfig,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let Some(content) = content(input, config, &mut errors) else {
            tracing::debug!(errors = errors.len(), "contact message rejected");
            return Err(errors);
        };

        let id = MessageId::new(ids.next_id())?;
        let message = Self::assemble(id, clock.now(), MessageStatus::Unread, content);
        tracing::debug!(id = %message.id, "contact message created");
        Ok(message)
    }

    /// Re-validate a stored message, keeping its id, date and status.
    pub fn restore(stored: &StoredMessage) -> Result<Self, FieldErrors> {
        Self::restore_with(stored, &ModelConfig::default())
    }

    pub fn restore_with(stored: &StoredMessage, config: &ModelConfig) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = errors.take(MessageId::new(stored.id.as_str()));
        let content = content(&stored.content, config, &mut errors);
        let date = errors.take(Timestamp::parse(fields::DATE, &stored.date));
        let status = errors.take(MessageStatus::parse(fields::STATUS, &stored.status));

        match (id, content, date, status) {
            (Some(id), Some(content), Some(date), Some(status)) if errors.is_empty() => {
                Ok(Self::assemble(id, date, status, content))
            }
            _ => {
                tracing::debug!(errors = errors.len(), "stored contact message rejected");
                Err(errors)
            }
        }
    }

    fn assemble(id: MessageId, date: Timestamp, status: MessageStatus, content: Content) -> Self {
        Self {
            id,
            name: content.name,
            phone: content.phone,
            email: content.email,
            subject: content.subject,
            message: content.message,
            date,
            status,
        }
    }

    /// Same message with status `Read`. Calling it on a read message is a no-op.
    pub fn mark_read(self) -> Self {
        if self.status == MessageStatus::Unread {
            tracing::trace!(id = %self.id, "contact message marked read");
        }
        Self {
            status: self.status.mark_read(),
            ..self
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn date(&self) -> Timestamp {
        self.date
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn is_unread(&self) -> bool {
        self.status == MessageStatus::Unread
    }

    pub fn to_stored(&self) -> StoredMessage {
        StoredMessage {
            id: self.id.as_str().to_owned(),
            date: self.date.to_iso_string(),
            status: self.status.as_str().to_owned(),
            content: ContactMessageInput {
                name: self.name.as_str().to_owned(),
                phone: self.phone.raw().to_owned(),
                email: self.email.as_str().to_owned(),
                subject: self.subject.as_str().to_owned(),
                message: self.message.as_str().to_owned(),
            },
        }
    }
}

/// Number of messages still waiting to be read.
pub fn unread_count(messages: &[ContactMessage]) -> usize {
    messages.iter().filter(|m| m.is_unread()).count()
}

/// Order an inbox newest first; ties keep their relative order.
pub fn sort_newest_first(messages: &mut [ContactMessage]) {
    messages.sort_by_key(|m| Reverse(m.date));
}
