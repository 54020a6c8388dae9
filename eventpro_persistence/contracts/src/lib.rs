use std::{fmt, future::Future};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Stores submitted records in named collections.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionRepository: Send + Sync + 'static {
    /// Inserts a single record into the given collection.
    ///
    /// The insert is atomic: either the whole record is stored or nothing
    /// is.
    fn insert(
        &self,
        collection: Collection,
        record: &Record,
    ) -> impl Future<Output = Result<Ack, RepositoryError>> + Send;

    /// Verify the connection to the underlying storage.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Contacts,
    NewsletterSubscribers,
}

impl Collection {
    pub const ALL: &'static [Self] = &[Self::Contacts, Self::NewsletterSubscribers];

    pub fn name(self) -> &'static str {
        match self {
            Self::Contacts => "contacts",
            Self::NewsletterSubscribers => "newsletter_subscribers",
        }
    }

    /// The columns a record in this collection may contain.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Contacts => &[
                "name",
                "email",
                "phone",
                "service_interest",
                "message",
                "event_date",
                "guest_count",
            ],
            Self::NewsletterSubscribers => &["name", "email", "interests"],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structured record, mapping column names to JSON values.
///
/// Columns that are missing from the record are stored as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to the serialized `value`.
    pub fn with(mut self, column: &str, value: impl Serialize) -> Result<Self, serde_json::Error> {
        self.0.insert(column.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Returns the first column of this record that does not exist in
    /// `collection`.
    pub fn unknown_column(&self, collection: Collection) -> Option<&str> {
        self.columns()
            .find(|column| !collection.columns().contains(column))
    }
}

/// Acknowledgement of a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// The id assigned to the new record.
    pub id: Uuid,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("The collection {collection} has no column {column:?}.")]
    UnknownColumn {
        collection: Collection,
        column: String,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockSubmissionRepository {
    pub fn with_insert(
        mut self,
        collection: Collection,
        record: Record,
        result: Result<Ack, RepositoryError>,
    ) -> Self {
        self.expect_insert()
            .once()
            .with(
                mockall::predicate::eq(collection),
                mockall::predicate::eq(record),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if result {
                Ok(())
            } else {
                Err(anyhow::anyhow!("storage unreachable"))
            }))
        });
        self
    }
}
