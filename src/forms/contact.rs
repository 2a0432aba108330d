use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

const NAME_MAX_LEN: u64 = 128;
const MESSAGE_MAX_LEN: u64 = 5000;

/// Topics offered by the subject drop-down.
pub const SUBJECTS: [&str; 4] = [
    "General Inquiry",
    "Product Review Request",
    "Bug Report",
    "Partnership",
];

pub type ContactFormResult<T> = Result<T, ContactFormError>;

/// Errors that can occur while processing the contact form.
#[derive(Debug, Error)]
pub enum ContactFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("unknown subject")]
    UnknownSubject,
}

/// Payload posted by the contact page. Missing fields decode as blank and
/// are reported by validation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub subject: String,
    #[validate(length(min = 1, max = MESSAGE_MAX_LEN))]
    pub message: String,
}

/// A validated contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_body(body: &[u8]) -> Result<Self, serde::de::value::Error> {
        serde_html_form::from_bytes(body)
    }

    /// Validates and sanitizes the payload. A blank subject defaults to the
    /// first topic.
    pub fn into_message(self) -> ContactFormResult<ContactMessage> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ContactFormError::Empty("name"));
        }

        let message = sanitize_multiline_text(&self.message);
        if message.is_empty() {
            return Err(ContactFormError::Empty("message"));
        }

        let subject = sanitize_inline_text(&self.subject);
        let subject = if subject.is_empty() {
            SUBJECTS[0].to_string()
        } else if SUBJECTS.contains(&subject.as_str()) {
            subject
        } else {
            return Err(ContactFormError::UnknownSubject);
        };

        Ok(ContactMessage {
            name,
            email: self.email.trim().to_lowercase(),
            subject,
            message,
        })
    }
}
