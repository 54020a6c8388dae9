use eventpro_models::{
    form::{FieldErrors, FormFields, FormSession, FormState, REQUIRED_FIELDS_LEGEND},
    notification::{Toast, ToastSeverity},
};
use serde::Serialize;
use uuid::Uuid;

pub mod contact;
pub mod newsletter;

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
}

/// Everything a client needs to render a form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFormView<A, O> {
    pub state: ApiFormState,
    pub fields: A,
    /// Inline error message per invalid field.
    pub errors: FieldErrors,
    pub toasts: Vec<ApiToast>,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
    pub required_fields: Vec<&'static str>,
    pub legend: &'static str,
    /// Selectable options and input hints.
    pub options: O,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<Uuid>,
}

impl<A, O> ApiFormView<A, O> {
    pub fn new<F>(session: &FormSession<F>, toasts: Vec<Toast>, options: O) -> Self
    where
        F: FormFields,
        A: From<F>,
    {
        Self {
            state: session.state().into(),
            fields: session.fields().clone().into(),
            errors: session.errors().clone(),
            toasts: toasts.into_iter().map(Into::into).collect(),
            submit_label: session.submit_label(),
            submit_disabled: session.is_submit_disabled(),
            required_fields: F::required_fields().collect(),
            legend: REQUIRED_FIELDS_LEGEND,
            options,
            submission_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiFormState {
    Idle,
    Validating,
    IdleWithErrors,
    Submitting,
    IdleCleared,
    IdleWithData,
}

impl From<FormState> for ApiFormState {
    fn from(value: FormState) -> Self {
        match value {
            FormState::Idle => Self::Idle,
            FormState::Validating => Self::Validating,
            FormState::IdleWithErrors => Self::IdleWithErrors,
            FormState::Submitting => Self::Submitting,
            FormState::IdleCleared => Self::IdleCleared,
            FormState::IdleWithData => Self::IdleWithData,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiToast {
    pub id: Uuid,
    pub severity: ToastSeverity,
    pub message: String,
    /// Milliseconds until the toast is dismissed.
    pub duration_ms: u64,
}

impl From<Toast> for ApiToast {
    fn from(value: Toast) -> Self {
        Self {
            id: *value.id,
            severity: value.severity,
            message: value.message,
            duration_ms: value.duration.as_millis().try_into().unwrap_or(u64::MAX),
        }
    }
}
