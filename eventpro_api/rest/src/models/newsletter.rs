use eventpro_models::newsletter::{NewsletterForm, NewsletterInterest};
use eventpro_utils::serde::null_as_default;
use serde::{Deserialize, Serialize};

/// The newsletter form as posted by a browser. `null` counts as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiNewsletterForm {
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default::deserialize")]
    pub interests: Vec<NewsletterInterest>,
}

impl From<ApiNewsletterForm> for NewsletterForm {
    fn from(value: ApiNewsletterForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            interests: value.interests,
        }
    }
}

impl From<NewsletterForm> for ApiNewsletterForm {
    fn from(value: NewsletterForm) -> Self {
        Self {
            name: value.name,
            email: value.email,
            interests: value.interests,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiNewsletterOptions {
    pub interests: &'static [&'static str],
}

impl ApiNewsletterOptions {
    pub fn current() -> Self {
        Self {
            interests: NewsletterInterest::LABELS,
        }
    }
}
