use anyhow::anyhow;
use eventpro_core_submission_contracts::{
    SubmissionFeatureService, SubmitError, CONTACT_FAILURE_MESSAGE, CONTACT_SUCCESS_MESSAGE,
    NEWSLETTER_FAILURE_MESSAGE, NEWSLETTER_SUCCESS_MESSAGE,
};
use eventpro_models::{
    contact::{ContactForm, ContactInquiry},
    form::{FormFields, FormSession},
    newsletter::{NewsletterForm, NewsletterSubscription},
    SubmissionId,
};
use eventpro_notification_contracts::NotificationSink;
use eventpro_persistence_contracts::{Ack, Collection, Record, SubmissionRepository};
use eventpro_utils::trace_instrument;
use tracing::{error, info};


#[derive(Debug, Clone)]
pub struct SubmissionFeatureServiceImpl<Repo> {
    repo: Repo,
}

impl<Repo> SubmissionFeatureServiceImpl<Repo> {
    pub fn new(repo: Repo) -> Self {
        Self { repo }
    }
}

impl<Repo> SubmissionFeatureService for SubmissionFeatureServiceImpl<Repo>
where
    Repo: SubmissionRepository,
{
    #[trace_instrument(skip(self, notifications))]
    async fn submit_contact(
        &self,
        notifications: &impl NotificationSink,
        session: &mut FormSession<ContactForm>,
    ) -> Result<SubmissionId, SubmitError> {
        self.submit(notifications, session).await
    }

    #[trace_instrument(skip(self, notifications))]
    async fn subscribe_newsletter(
        &self,
        notifications: &impl NotificationSink,
        session: &mut FormSession<NewsletterForm>,
    ) -> Result<SubmissionId, SubmitError> {
        self.submit(notifications, session).await
    }
}

impl<Repo> SubmissionFeatureServiceImpl<Repo>
where
    Repo: SubmissionRepository,
{
    async fn submit<F: Submittable>(
        &self,
        notifications: &impl NotificationSink,
        session: &mut FormSession<F>,
    ) -> Result<SubmissionId, SubmitError> {
        let fields = session.begin_submission()?;

        let result = self.store(fields).await;
        session.finish_submission(result.is_ok());

        match result {
            Ok(Ack { id }) => {
                info!(collection = %F::COLLECTION, %id, "stored submission");
                notifications.notify_success(F::SUCCESS_MESSAGE);
                Ok(id.into())
            }
            Err(err) => {
                error!(collection = %F::COLLECTION, "Failed to store submission: {err:#}");
                notifications.notify_failure(F::FAILURE_MESSAGE);
                Err(SubmitError::Failed)
            }
        }
    }

    async fn store<F: Submittable>(&self, fields: F) -> anyhow::Result<Ack> {
        let record = fields.into_record()?;
        self.repo
            .insert(F::COLLECTION, &record)
            .await
            .map_err(Into::into)
    }
}

/// A form whose contents end up as a record in one collection.
trait Submittable: FormFields {
    const COLLECTION: Collection;
    const SUCCESS_MESSAGE: &'static str;
    const FAILURE_MESSAGE: &'static str;

    fn into_record(self) -> anyhow::Result<Record>;
}

impl Submittable for ContactForm {
    const COLLECTION: Collection = Collection::Contacts;
    const SUCCESS_MESSAGE: &'static str = CONTACT_SUCCESS_MESSAGE;
    const FAILURE_MESSAGE: &'static str = CONTACT_FAILURE_MESSAGE;

    fn into_record(self) -> anyhow::Result<Record> {
        let inquiry = ContactInquiry::try_from(self)
            .map_err(|errors| anyhow!("Rejected validated contact form: {errors:?}"))?;

        Ok(Record::new()
            .with("name", &inquiry.name)?
            .with("email", &inquiry.email)?
            .with("phone", &inquiry.phone)?
            .with("service_interest", inquiry.service)?
            .with("message", &inquiry.message)?
            .with("event_date", inquiry.event_date)?
            .with("guest_count", inquiry.guest_count)?)
    }
}

impl Submittable for NewsletterForm {
    const COLLECTION: Collection = Collection::NewsletterSubscribers;
    const SUCCESS_MESSAGE: &'static str = NEWSLETTER_SUCCESS_MESSAGE;
    const FAILURE_MESSAGE: &'static str = NEWSLETTER_FAILURE_MESSAGE;

    fn into_record(self) -> anyhow::Result<Record> {
        let subscription = NewsletterSubscription::try_from(self)
            .map_err(|errors| anyhow!("Rejected validated newsletter form: {errors:?}"))?;

        Ok(Record::new()
            .with("name", &subscription.name)?
            .with("email", &subscription.email)?
            .with("interests", &subscription.interests)?)
    }
}
