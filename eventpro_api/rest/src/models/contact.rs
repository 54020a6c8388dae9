use chrono::{Local, NaiveDate};
use eventpro_models::contact::{ContactForm, ServiceInterest, GUEST_COUNT_MIN};
use eventpro_utils::serde::{empty_as_none, null_as_default};
use serde::{Deserialize, Serialize};

/// The contact form as posted by a browser.
///
/// `null` text fields count as empty, `""` dates and guest counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiContactForm {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub phone: String,
    /// Label of the selected service, empty if none was selected
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub service: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub message: String,
    #[serde(with = "empty_as_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(with = "empty_as_none")]
    pub guest_count: Option<i32>,
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            service: value.service,
            message: value.message,
            event_date: value.event_date,
            guest_count: value.guest_count,
        }
    }
}

impl From<ContactForm> for ApiContactForm {
    fn from(value: ContactForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            service: value.service,
            message: value.message,
            event_date: value.event_date,
            guest_count: value.guest_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactOptions {
    pub services: &'static [&'static str],
    /// Earliest date the date picker should offer.
    pub event_date_min: NaiveDate,
    pub guest_count_min: i32,
}

impl ApiContactOptions {
    pub fn current() -> Self {
        Self {
            services: ServiceInterest::LABELS,
            event_date_min: Local::now().date_naive(),
            guest_count_min: GUEST_COUNT_MIN,
        }
    }
}
