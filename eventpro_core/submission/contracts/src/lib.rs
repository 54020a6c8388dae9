use std::future::Future;

use eventpro_models::{
    contact::ContactForm,
    form::{FieldErrors, FormSession, SubmissionBlocked},
    newsletter::NewsletterForm,
    SubmissionId,
};
use eventpro_notification_contracts::NotificationSink;
use thiserror::Error;

pub const CONTACT_SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";
pub const CONTACT_FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";
pub const NEWSLETTER_SUCCESS_MESSAGE: &str =
    "Welcome to our newsletter! Check your email for confirmation.";
pub const NEWSLETTER_FAILURE_MESSAGE: &str = "Failed to subscribe. Please try again.";

/// Validates form sessions and stores their contents.
///
/// Both operations drive the session through its state machine: invalid
/// fields leave it with inline errors and nothing is stored; otherwise the
/// record is stored and the outcome is reported through `notifications`,
/// clearing the fields on success and keeping them on failure.
pub trait SubmissionFeatureService: Send + Sync + 'static {
    /// Stores a contact inquiry in the `contacts` collection.
    fn submit_contact(
        &self,
        notifications: &impl NotificationSink,
        session: &mut FormSession<ContactForm>,
    ) -> impl Future<Output = Result<SubmissionId, SubmitError>> + Send;

    /// Stores a newsletter subscription in the `newsletter_subscribers`
    /// collection.
    fn subscribe_newsletter(
        &self,
        notifications: &impl NotificationSink,
        session: &mut FormSession<NewsletterForm>,
    ) -> impl Future<Output = Result<SubmissionId, SubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("The form contains invalid fields.")]
    Invalid(FieldErrors),
    #[error("A submission of this form is already in progress.")]
    InFlight,
    /// The record could not be stored. The user has already been notified
    /// and the cause has been logged.
    #[error("Failed to store the submission.")]
    Failed,
}

impl From<SubmissionBlocked> for SubmitError {
    fn from(value: SubmissionBlocked) -> Self {
        match value {
            SubmissionBlocked::InFlight => Self::InFlight,
            SubmissionBlocked::Invalid(errors) => Self::Invalid(errors),
        }
    }
}
