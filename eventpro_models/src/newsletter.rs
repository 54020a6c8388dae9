use std::collections::BTreeSet;

use crate::{
    form::{FieldErrors, FieldRules, FormFields, Rule},
    macros::catalog,
    EmailAddress, SubmitterName, EMAIL_REGEX, NAME_MIN_LEN,
};

catalog! {
    /// Topics a newsletter subscriber can opt into.
    pub enum NewsletterInterest {
        Events => "Events",
        Catering => "Catering",
        EquipmentRentals => "Equipment Rentals",
        SpecialOffers => "Special Offers",
    }
}

/// The newsletter signup form as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsletterForm {
    pub name: String,
    pub email: String,
    pub interests: Vec<NewsletterInterest>,
}

static NEWSLETTER_RULES: &[FieldRules<NewsletterForm>] = &[
    FieldRules {
        field: "name",
        value: |form| form.name.as_str(),
        rules: &[
            Rule::Required("Name is required"),
            Rule::MinLength(NAME_MIN_LEN, "Name must be at least 2 characters"),
        ],
    },
    FieldRules {
        field: "email",
        value: |form| form.email.as_str(),
        rules: &[
            Rule::Required("Email is required"),
            Rule::Pattern(&EMAIL_REGEX, "Invalid email address"),
        ],
    },
];

impl FormFields for NewsletterForm {
    const SUBMIT_LABEL: &'static str = "Subscribe";
    const BUSY_LABEL: &'static str = "Subscribing...";

    fn rules() -> &'static [FieldRules<Self>] {
        NEWSLETTER_RULES
    }
}

/// A validated newsletter subscription, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterSubscription {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub interests: BTreeSet<NewsletterInterest>,
}

impl TryFrom<NewsletterForm> for NewsletterSubscription {
    type Error = FieldErrors;

    fn try_from(form: NewsletterForm) -> Result<Self, Self::Error> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name: SubmitterName::try_new(form.name)
                .map_err(|_| FieldErrors::single("name", "Invalid name"))?,
            email: EmailAddress::try_new(form.email)
                .map_err(|_| FieldErrors::single("email", "Invalid email"))?,
            interests: form.interests.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn name_too_short() {
        let form = NewsletterForm {
            name: "A".into(),
            email: "a@b.com".into(),
            interests: Vec::new(),
        };
        assert_eq!(
            form.validate(),
            FieldErrors::single("name", "Name must be at least 2 characters")
        );
    }

    #[test]
    fn empty_form_reports_required_fields_only() {
        assert_eq!(
            NewsletterForm::default().validate(),
            FieldErrors::from_iter([("name", "Name is required"), ("email", "Email is required")])
        );
    }

    #[test]
    fn invalid_email() {
        let form = NewsletterForm {
            name: "Alex".into(),
            email: "alex@localhost".into(),
            interests: vec![NewsletterInterest::Events],
        };
        assert_eq!(
            form.validate(),
            FieldErrors::single("email", "Invalid email address")
        );
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            NewsletterForm::required_fields().collect::<Vec<_>>(),
            ["name", "email"]
        );
    }

    #[test]
    fn into_subscription_deduplicates_interests() {
        let subscription = NewsletterSubscription::try_from(NewsletterForm {
            name: "Alex".into(),
            email: "alex@example.com".into(),
            interests: vec![
                NewsletterInterest::SpecialOffers,
                NewsletterInterest::Events,
                NewsletterInterest::SpecialOffers,
            ],
        })
        .unwrap();

        assert_eq!(
            subscription.interests.into_iter().collect::<Vec<_>>(),
            [NewsletterInterest::Events, NewsletterInterest::SpecialOffers]
        );
    }

    #[test]
    fn unknown_interest_is_rejected_by_deserialization() {
        serde_json::from_str::<NewsletterInterest>(r#""Equipment Rentals""#).unwrap();
        serde_json::from_str::<NewsletterInterest>(r#""Gardening""#).unwrap_err();
    }
}
