use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::{
    form::{FieldErrors, FieldRules, FormFields, Rule},
    macros::{catalog, nutype_string},
    EmailAddress, SubmitterName, EMAIL_REGEX, NAME_MIN_LEN,
};

pub static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s()+-]*$").unwrap());

pub const MESSAGE_MIN_LEN: usize = 10;

/// Smallest guest count suggested by the form.
pub const GUEST_COUNT_MIN: i32 = 1;

catalog! {
    /// The services an inquiry can be about.
    pub enum ServiceInterest {
        TentRentals => "Tent Rentals",
        SoundSystems => "Sound Systems",
        CateringServices => "Catering Services",
        EventStaffing => "Event Staffing",
        Photography => "Photography",
        DecorAndStyling => "Decor & Styling",
        FullEventPackage => "Full Event Package",
    }
}

nutype_string!(PhoneNumber(validate(regex = PHONE_REGEX)));
nutype_string!(InquiryMessage(validate(
    predicate = |message: &str| crate::form::text_len(message) >= crate::contact::MESSAGE_MIN_LEN
)));

/// The contact form as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
}

static CONTACT_RULES: &[FieldRules<ContactForm>] = &[
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
    FieldRules {
        field: "phone",
        value: |form| form.phone.as_str(),
        rules: &[Rule::Pattern(&PHONE_REGEX, "Invalid phone number")],
    },
    FieldRules {
        field: "service",
        value: |form| form.service.as_str(),
        rules: &[
            Rule::Required("Please select a service"),
            Rule::OneOf(ServiceInterest::LABELS, "Please select a service"),
        ],
    },
    FieldRules {
        field: "message",
        value: |form| form.message.as_str(),
        rules: &[
            Rule::Required("Message is required"),
            Rule::MinLength(MESSAGE_MIN_LEN, "Message must be at least 10 characters"),
        ],
    },
];

impl FormFields for ContactForm {
    const SUBMIT_LABEL: &'static str = "Send Message";
    const BUSY_LABEL: &'static str = "Sending...";

    fn rules() -> &'static [FieldRules<Self>] {
        CONTACT_RULES
    }
}

/// A validated contact inquiry, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInquiry {
    pub name: SubmitterName,
    pub email: EmailAddress,
    pub phone: Option<PhoneNumber>,
    pub service: ServiceInterest,
    pub message: InquiryMessage,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<i32>,
}

impl TryFrom<ContactForm> for ContactInquiry {
    type Error = FieldErrors;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let phone = if form.phone.is_empty() {
            None
        } else {
            PhoneNumber::try_new(form.phone)
                .map(Some)
                .map_err(|_| FieldErrors::single("phone", "Invalid phone"))?
        };

        Ok(Self {
            name: SubmitterName::try_new(form.name)
                .map_err(|_| FieldErrors::single("name", "Invalid name"))?,
            email: EmailAddress::try_new(form.email)
                .map_err(|_| FieldErrors::single("email", "Invalid email"))?,
            phone,
            service: form
                .service
                .parse()
                .map_err(|_| FieldErrors::single("service", "Please select a service"))?,
            message: InquiryMessage::try_new(form.message)
                .map_err(|_| FieldErrors::single("message", "Invalid message"))?,
            event_date: form.event_date,
            guest_count: form.guest_count,
        })
    }
}
