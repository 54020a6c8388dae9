//! Declarative field validation and the per-form submission state machine.
//!
//! Every form is described by a static rule table mapping field names to an
//! ordered list of [`Rule`]s. [`validate`] evaluates the whole table and
//! reports at most one message per failing field, so all violations can be
//! shown at once.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

pub const REQUIRED_FIELDS_LEGEND: &str = "* Required fields";

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The value must not be empty.
    Required(&'static str),
    /// The value must be at least this long, as measured by [`text_len`].
    MinLength(usize, &'static str),
    /// The value must match the pattern.
    Pattern(&'static LazyLock<Regex>, &'static str),
    /// The value must be one of the listed options.
    OneOf(&'static [&'static str], &'static str),
}

impl Rule {
    /// Returns the message of this rule if `value` violates it.
    ///
    /// `Required` is handled by [`evaluate`], which also skips all other rules
    /// for empty values.
    fn violation(self, value: &str) -> Option<&'static str> {
        match self {
            Rule::Required(_) => None,
            Rule::MinLength(min, message) => (text_len(value) < min).then_some(message),
            Rule::Pattern(regex, message) => (!regex.is_match(value)).then_some(message),
            Rule::OneOf(options, message) => (!options.contains(&value)).then_some(message),
        }
    }
}

/// Length of `value` in UTF-16 code units, the unit browsers use for
/// `minlength` and `String.length`.
pub fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// The rules for a single field of the form `F`.
pub struct FieldRules<F: 'static> {
    pub field: &'static str,
    pub value: fn(&F) -> &str,
    pub rules: &'static [Rule],
}

impl<F> FieldRules<F> {
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|rule| matches!(rule, Rule::Required(_)))
    }
}

/// Returns the first violated rule's message for `value`, if any.
pub fn evaluate(rules: &[Rule], value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return rules.iter().find_map(|rule| match rule {
            Rule::Required(message) => Some(*message),
            _ => None,
        });
    }

    rules.iter().find_map(|rule| rule.violation(value))
}

/// Checks every field of `form` against `table`.
///
/// Fields without an entry in the table are always valid.
pub fn validate<F>(table: &[FieldRules<F>], form: &F) -> FieldErrors {
    table
        .iter()
        .filter_map(|entry| {
            evaluate(entry.rules, (entry.value)(form)).map(|message| (entry.field, message))
        })
        .collect()
}

/// Maps the name of each invalid field to a human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, &'static str>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: &'static str) -> Self {
        Self(BTreeMap::from([(field, message)]))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(&field, &message)| (field, message))
    }
}

impl FromIterator<(&'static str, &'static str)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (&'static str, &'static str)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The user-editable contents of a form.
pub trait FormFields: Clone + Default + Send + Sync + 'static {
    /// Label of the submit control while idle.
    const SUBMIT_LABEL: &'static str;
    /// Label of the submit control while a submission is in flight.
    const BUSY_LABEL: &'static str;

    fn rules() -> &'static [FieldRules<Self>];

    fn validate(&self) -> FieldErrors {
        validate(Self::rules(), self)
    }

    fn required_fields() -> impl Iterator<Item = &'static str> {
        Self::rules()
            .iter()
            .filter(|entry| entry.is_required())
            .map(|entry| entry.field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormState {
    /// Nothing has been submitted yet.
    Idle,
    /// The fields are being checked against the rule table.
    Validating,
    /// Validation failed; the errors are shown next to their fields.
    IdleWithErrors,
    /// The record is on its way to the repository.
    Submitting,
    /// The last submission succeeded and the fields were reset.
    IdleCleared,
    /// The last submission failed; the fields were kept for a retry.
    IdleWithData,
}

impl FormState {
    pub fn is_idle(self) -> bool {
        !matches!(self, Self::Validating | Self::Submitting)
    }
}

/// Why a submission could not be started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionBlocked {
    /// Another submission of this form is still in flight.
    InFlight,
    Invalid(FieldErrors),
}

/// One instance of a form, owned by whoever renders it.
///
/// The session is reusable indefinitely: every submission ends in one of the
/// idle states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession<F> {
    fields: F,
    errors: FieldErrors,
    state: FormState,
}

impl<F: FormFields> Default for FormSession<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F: FormFields> FormSession<F> {
    pub fn new(fields: F) -> Self {
        Self {
            fields,
            errors: FieldErrors::new(),
            state: FormState::Idle,
        }
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    pub fn into_fields(self) -> F {
        self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submit_disabled() {
            F::BUSY_LABEL
        } else {
            F::SUBMIT_LABEL
        }
    }

    /// Validates the current fields and, if they are valid, enters the
    /// submitting state and returns a snapshot of the fields to send.
    pub fn begin_submission(&mut self) -> Result<F, SubmissionBlocked> {
        if self.state == FormState::Submitting {
            return Err(SubmissionBlocked::InFlight);
        }

        self.state = FormState::Validating;
        self.errors = self.fields.validate();

        if !self.errors.is_empty() {
            self.state = FormState::IdleWithErrors;
            return Err(SubmissionBlocked::Invalid(self.errors.clone()));
        }

        self.state = FormState::Submitting;
        Ok(self.fields.clone())
    }

    /// Leaves the submitting state. On success the fields are reset to their
    /// defaults; on failure they are kept untouched.
    ///
    /// Does nothing if no submission is in flight.
    pub fn finish_submission(&mut self, succeeded: bool) {
        if self.state != FormState::Submitting {
            return;
        }

        if succeeded {
            self.fields = F::default();
            self.state = FormState::IdleCleared;
        } else {
            self.state = FormState::IdleWithData;
        }
    }
}

#[cfg(test)]
mod tests {
    use eventpro_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::EMAIL_REGEX;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct TestForm {
        name: String,
        email: String,
        color: String,
        note: String,
    }

    static RULES: &[FieldRules<TestForm>] = &[
        FieldRules {
            field: "name",
            value: |form| form.name.as_str(),
            rules: &[
                Rule::Required("Name is required"),
                Rule::MinLength(2, "Name is too short"),
            ],
        },
        FieldRules {
            field: "email",
            value: |form| form.email.as_str(),
            rules: &[Rule::Pattern(&EMAIL_REGEX, "Invalid email address")],
        },
        FieldRules {
            field: "color",
            value: |form| form.color.as_str(),
            rules: &[
                Rule::Required("Pick a color"),
                Rule::OneOf(&["red", "green"], "Pick a color"),
            ],
        },
    ];

    impl FormFields for TestForm {
        const SUBMIT_LABEL: &'static str = "Save";
        const BUSY_LABEL: &'static str = "Saving...";

        fn rules() -> &'static [FieldRules<Self>] {
            RULES
        }
    }

    fn valid() -> TestForm {
        TestForm {
            name: "Max".into(),
            email: "max@example.com".into(),
            color: "red".into(),
            note: String::new(),
        }
    }

    #[test]
    fn evaluate_required_before_other_rules() {
        let rules = &[Rule::Required("missing"), Rule::MinLength(3, "short")];
        assert_eq!(evaluate(rules, ""), Some("missing"));
        assert_eq!(evaluate(rules, "ab"), Some("short"));
        assert_eq!(evaluate(rules, "abc"), None);
    }

    #[test]
    fn evaluate_optional_empty_value_skips_rules() {
        let rules = &[Rule::MinLength(3, "short"), Rule::OneOf(&["x"], "unknown")];
        assert_eq!(evaluate(rules, ""), None);
        assert_eq!(evaluate(rules, "abc"), Some("unknown"));
    }

    #[test]
    fn evaluate_min_length_counts_utf16_units() {
        let rules = &[Rule::MinLength(2, "short")];
        assert_eq!(evaluate(rules, "ä"), Some("short"));
        assert_eq!(evaluate(rules, "äö"), None);
        assert_eq!(evaluate(rules, "😀"), None);
    }

    #[test]
    fn text_len_units() {
        assert_eq!(text_len(""), 0);
        assert_eq!(text_len("Jo"), 2);
        assert_eq!(text_len("Zoë"), 3);
        assert_eq!(text_len("😀"), 2);
    }

    #[test]
    fn validate_valid() {
        assert!(valid().validate().is_empty());
    }

    #[test]
    fn validate_reports_every_failing_field() {
        let errors = TestForm::default().validate();
        assert_eq!(
            errors,
            FieldErrors::from_iter([("name", "Name is required"), ("color", "Pick a color")])
        );

        let errors = TestForm {
            name: "M".into(),
            email: "nope".into(),
            color: "blue".into(),
            note: "anything".into(),
        }
        .validate();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Name is too short"));
        assert_eq!(errors.get("email"), Some("Invalid email address"));
        assert_eq!(errors.get("color"), Some("Pick a color"));
        assert_eq!(errors.get("note"), None);
    }

    #[test]
    fn validate_is_idempotent() {
        let form = TestForm {
            email: "nope".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), form.validate());
    }

    #[test]
    fn required_fields() {
        assert_eq!(
            TestForm::required_fields().collect::<Vec<_>>(),
            ["name", "color"]
        );
    }

    #[test]
    fn session_success_clears_fields() {
        let mut session = FormSession::new(valid());
        assert_eq!(session.state(), FormState::Idle);
        assert_eq!(session.submit_label(), "Save");

        let snapshot = session.begin_submission().unwrap();
        assert_eq!(snapshot, valid());
        assert_eq!(session.state(), FormState::Submitting);
        assert!(session.is_submit_disabled());
        assert_eq!(session.submit_label(), "Saving...");

        session.finish_submission(true);
        assert_eq!(session.state(), FormState::IdleCleared);
        assert_eq!(session.fields(), &TestForm::default());
        assert!(!session.is_submit_disabled());
    }

    #[test]
    fn session_failure_keeps_fields() {
        let mut session = FormSession::new(valid());
        session.begin_submission().unwrap();
        session.finish_submission(false);
        assert_eq!(session.state(), FormState::IdleWithData);
        assert_eq!(session.fields(), &valid());
        assert_eq!(session.submit_label(), "Save");
    }

    #[test]
    fn session_invalid() {
        let mut session = FormSession::<TestForm>::default();
        let result = session.begin_submission();
        assert_matches!(result, Err(SubmissionBlocked::Invalid(errors)) if errors.len() == 2);
        assert_eq!(session.state(), FormState::IdleWithErrors);
        assert_eq!(session.errors().get("name"), Some("Name is required"));

        // fixing the fields clears the errors on the next attempt
        *session.fields_mut() = valid();
        session.begin_submission().unwrap();
        assert!(session.errors().is_empty());
    }

    #[test]
    fn session_rejects_resubmission_while_in_flight() {
        let mut session = FormSession::new(valid());
        session.begin_submission().unwrap();
        assert_eq!(session.begin_submission(), Err(SubmissionBlocked::InFlight));
        assert_eq!(session.state(), FormState::Submitting);
    }

    #[test]
    fn session_finish_without_submission_is_ignored() {
        let mut session = FormSession::new(valid());
        session.finish_submission(true);
        assert_eq!(session.state(), FormState::Idle);
        assert_eq!(session.fields(), &valid());
    }

    #[test]
    fn session_is_reusable() {
        let mut session = FormSession::new(valid());
        session.begin_submission().unwrap();
        session.finish_submission(true);

        *session.fields_mut() = valid();
        session.begin_submission().unwrap();
        session.finish_submission(false);
        assert_eq!(session.state(), FormState::IdleWithData);
        assert!(session.state().is_idle());
    }
}
