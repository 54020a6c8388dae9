use std::sync::LazyLock;

use macros::{id, nutype_string};
use regex::Regex;
use thiserror::Error;

pub mod contact;
pub mod form;
mod macros;
pub mod newsletter;
pub mod notification;

/// Loose `local@domain.tld` check. Letters are ASCII only, in either case.
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

pub const NAME_MIN_LEN: usize = 2;

id!(SubmissionId);

nutype_string!(SubmitterName(validate(
    predicate = |name: &str| crate::form::text_len(name) >= crate::NAME_MIN_LEN
)));
nutype_string!(EmailAddress(validate(regex = EMAIL_REGEX)));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown catalog entry {0:?}")]
pub struct UnknownCatalogEntry(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex() {
        for valid in [
            "jo@x.com",
            "a@b.co",
            "First.Last+tag@sub.example.ORG",
            "x_y%z-1@mail-server.example.de",
        ] {
            assert!(EMAIL_REGEX.is_match(valid), "{valid}");
            EmailAddress::try_new(valid).unwrap();
        }

        for invalid in [
            "",
            "not-an-email",
            "jo@x",
            "jo@x.c",
            "@x.com",
            "jo@.com2",
            "jo x@x.com",
            "jo@x.com ",
            "jo@x.\u{17f}om",
            "\u{212a}@x.com",
        ] {
            assert!(!EMAIL_REGEX.is_match(invalid), "{invalid}");
            EmailAddress::try_new(invalid).unwrap_err();
        }
    }

    #[test]
    fn submitter_name_length_counts_utf16_units() {
        SubmitterName::try_new("Jo").unwrap();
        SubmitterName::try_new("Zoë").unwrap();
        SubmitterName::try_new("😀").unwrap();
        SubmitterName::try_new("ö").unwrap_err();
        SubmitterName::try_new("").unwrap_err();
    }
}
