use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use eventpro_core_submission_contracts::{SubmissionFeatureService, SubmitError};
use eventpro_models::{
    contact::ContactForm,
    form::{FormFields, FormSession},
    newsletter::NewsletterForm,
    SubmissionId,
};
use eventpro_notification_impl::{ToastQueue, ToastQueueConfig};
use serde::Serialize;

use crate::models::{
    contact::{ApiContactForm, ApiContactOptions},
    newsletter::{ApiNewsletterForm, ApiNewsletterOptions},
    ApiFormView,
};

pub struct FormsState<Submission> {
    pub service: Submission,
    pub toasts: ToastQueueConfig,
}

pub fn router<Submission: SubmissionFeatureService>(
    state: Arc<FormsState<Submission>>,
) -> Router<()> {
    Router::new()
        .route(
            "/forms/contact",
            routing::get(blank_contact).post(submit_contact::<Submission>),
        )
        .route(
            "/forms/newsletter",
            routing::get(blank_newsletter).post(subscribe_newsletter::<Submission>),
        )
        .with_state(state)
}

async fn blank_contact() -> Response {
    let view = ApiFormView::<ApiContactForm, _>::new(
        &FormSession::<ContactForm>::default(),
        Vec::new(),
        ApiContactOptions::current(),
    );
    Json(view).into_response()
}

async fn blank_newsletter() -> Response {
    let view = ApiFormView::<ApiNewsletterForm, _>::new(
        &FormSession::<NewsletterForm>::default(),
        Vec::new(),
        ApiNewsletterOptions::current(),
    );
    Json(view).into_response()
}

async fn submit_contact<Submission: SubmissionFeatureService>(
    state: State<Arc<FormsState<Submission>>>,
    Json(form): Json<ApiContactForm>,
) -> Response {
    let toasts = ToastQueue::new(state.toasts.clone());
    let mut session = FormSession::new(ContactForm::from(form));

    let result = state.service.submit_contact(&toasts, &mut session).await;

    respond::<_, ApiContactForm, _>(result, &session, &toasts, ApiContactOptions::current())
}

async fn subscribe_newsletter<Submission: SubmissionFeatureService>(
    state: State<Arc<FormsState<Submission>>>,
    Json(form): Json<ApiNewsletterForm>,
) -> Response {
    let toasts = ToastQueue::new(state.toasts.clone());
    let mut session = FormSession::new(NewsletterForm::from(form));

    let result = state
        .service
        .subscribe_newsletter(&toasts, &mut session)
        .await;

    respond::<_, ApiNewsletterForm, _>(
        result,
        &session,
        &toasts,
        ApiNewsletterOptions::current(),
    )
}

fn respond<F, A, O>(
    result: Result<SubmissionId, SubmitError>,
    session: &FormSession<F>,
    toasts: &ToastQueue,
    options: O,
) -> Response
where
    F: FormFields,
    A: From<F> + Serialize,
    O: Serialize,
{
    let code = match &result {
        Ok(_) => StatusCode::OK,
        Err(SubmitError::Invalid(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        Err(SubmitError::InFlight) => StatusCode::CONFLICT,
        Err(SubmitError::Failed) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let mut view = ApiFormView::<A, O>::new(session, toasts.drain(), options);
    view.submission_id = result.ok().map(|id| *id);

    (code, Json(view)).into_response()
}
