//! Validated data model for a small business website.
//!
//! Three entities are defined here: the company's contact and location
//! record ([`CompanyDetails`], including a weekly opening-hours template),
//! inbound contact-form messages ([`ContactMessage`]) and FAQ entries
//! ([`Faq`]). The crate is split into a domain layer of strong types and
//! pure validation, and a transport layer that maps untyped JSON to and from
//! those types. Persistence, rendering and authentication live elsewhere.
//!
//! ```rust
//! use bizinfo::{ContactMessage, ContactMessageInput, SystemClock, UuidIdSource};
//!
//! let input = ContactMessageInput {
//!     name: "Ada".into(),
//!     phone: "+44 20 7946 0958".into(),
//!     email: "ada@example.org".into(),
//!     subject: "Hours".into(),
//!     message: "Open on Sunday?".into(),
//! };
//! let msg = ContactMessage::create(&input, &SystemClock, &UuidIdSource)?;
//! assert!(msg.is_unread());
//! let msg = msg.mark_read();
//! assert!(!msg.is_unread());
//! # Ok::<(), bizinfo::FieldErrors>(())
//! ```
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod transport;

pub use config::{ModelConfig, ModelConfigBuilder};
pub use domain::{
    Address, CompanyDetails, CompanyDetailsDraft, CompanyDetailsPatch, ContactMessage,
    ContactMessageInput, DayHours, DayHoursDraft, ErrorKind, Faq, FaqInput, FieldError,
    FieldErrors, MessageStatus, SystemClock, UuidIdSource, Weekday, WorkingHours,
};
pub use transport::TransportError;
