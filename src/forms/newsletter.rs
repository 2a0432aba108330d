use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Newsletter topics a visitor can opt into.
pub const INTERESTS: [&str; 4] = [
    "All Topics",
    "Tech & Electronics",
    "Home & Kitchen",
    "Health & Fitness",
];

pub type NewsletterFormResult<T> = Result<T, NewsletterFormError>;

#[derive(Debug, Error)]
pub enum NewsletterFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("unknown interest: {0}")]
    UnknownInterest(String),
}

/// Newsletter sign-up payload. `interests` may repeat in the body, so it
/// is decoded with `serde_html_form`.
#[derive(Debug, Deserialize, Validate)]
pub struct NewsletterForm {
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub email: String,
    pub interests: Vec<String>,
}

impl NewsletterForm {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_body(body: &[u8]) -> Result<Self, serde::de::value::Error> {
        serde_html_form::from_bytes(body)
    }

    /// Validates the payload. Without any interest the subscription covers
    /// all topics; duplicates are dropped.
    pub fn into_subscription(self) -> NewsletterFormResult<Subscription> {
        self.validate()?;

        let mut interests: Vec<String> = Vec::with_capacity(self.interests.len());
        for interest in self.interests {
            let interest = interest.trim();
            if interest.is_empty() {
                continue;
            }
            if !INTERESTS.contains(&interest) {
                return Err(NewsletterFormError::UnknownInterest(interest.to_string()));
            }
            if !interests.iter().any(|known| known == interest) {
                interests.push(interest.to_string());
            }
        }
        if interests.is_empty() {
            interests.push(INTERESTS[0].to_string());
        }

        Ok(Subscription {
            email: self.email.trim().to_lowercase(),
            interests,
        })
    }
}
