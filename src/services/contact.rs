use std::time::Duration;

use crate::forms::contact::ContactForm;
use crate::forms::newsletter::NewsletterForm;
use crate::services::{ServiceError, ServiceResult};

/// Pause applied before acknowledging a submission.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);

/// Result of a successful form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Flash message shown after the redirect.
    pub message: String,
    pub redirect_to: String,
}

/// Accept a contact message. Nothing is delivered anywhere; the visitor
/// sees a confirmation once `delay` has passed.
pub async fn submit_contact(form: ContactForm, delay: Duration) -> ServiceResult<SubmissionOutcome> {
    let message = form
        .into_message()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    tokio::time::sleep(delay).await;
    log::info!(
        "Contact message received from {} about {:?}",
        message.email,
        message.subject
    );

    Ok(SubmissionOutcome {
        message: format!(
            "Thank you, {}. We have received your message and will respond shortly.",
            message.name
        ),
        redirect_to: "/contact".to_string(),
    })
}

/// Accept a newsletter sign-up after `delay`.
pub async fn subscribe_newsletter(
    form: NewsletterForm,
    delay: Duration,
) -> ServiceResult<SubmissionOutcome> {
    let subscription = form
        .into_subscription()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    tokio::time::sleep(delay).await;
    log::info!(
        "Newsletter sign-up for {} ({})",
        subscription.email,
        subscription.interests.join(", ")
    );

    Ok(SubmissionOutcome {
        message: "You're subscribed to The Zenith Weekly.".to_string(),
        redirect_to: "/connect".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn valid_contact_form_is_acknowledged() {
        let form = ContactForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            subject: String::new(),
            message: "Hello".to_string(),
        };

        let outcome = submit_contact(form, Duration::ZERO)
            .await
            .expect("expected success");

        assert_eq!(outcome.redirect_to, "/contact");
        assert!(outcome.message.contains("Jane"));
    }

    #[tokio::test]
    async fn invalid_contact_form_is_a_form_error() {
        let form = ContactForm {
            name: "Jane".to_string(),
            email: "jane".to_string(),
            subject: String::new(),
            message: "Hello".to_string(),
        };

        let result = submit_contact(form, Duration::ZERO).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[tokio::test]
    async fn newsletter_sign_up_redirects_to_connect() {
        let form = NewsletterForm {
            email: "reader@example.com".to_string(),
            interests: Vec::new(),
        };

        let outcome = subscribe_newsletter(form, Duration::ZERO)
            .await
            .expect("expected success");

        assert_eq!(outcome.redirect_to, "/connect");
    }
}
