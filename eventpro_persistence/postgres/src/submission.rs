use anyhow::Context;
use bb8_postgres::tokio_postgres::types::Json;
use eventpro_persistence_contracts::{
    Ack, Collection, Record, RepositoryError, SubmissionRepository,
};
use eventpro_utils::trace_instrument;
use uuid::Uuid;

use crate::PostgresDatabase;

/// Stores each collection in the table of the same name.
#[derive(Debug, Clone)]
pub struct PostgresSubmissionRepository {
    db: PostgresDatabase,
}

impl PostgresSubmissionRepository {
    pub fn new(db: PostgresDatabase) -> Self {
        Self { db }
    }
}

impl SubmissionRepository for PostgresSubmissionRepository {
    #[trace_instrument(skip(self))]
    async fn insert(&self, collection: Collection, record: &Record) -> Result<Ack, RepositoryError> {
        if let Some(column) = record.unknown_column(collection) {
            return Err(RepositoryError::UnknownColumn {
                collection,
                column: column.into(),
            });
        }

        let conn = self
            .db
            .pool
            .get()
            .await
            .context("Failed to acquire database connection")?;

        let id: Uuid = conn
            .query_one(&insert_query(collection), &[&Json(record.fields())])
            .await
            .with_context(|| format!("Failed to insert record into {collection}"))?
            .get(0);

        Ok(Ack { id })
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.db.ping().await
    }
}

/// Builds a single statement that inserts the json object passed as `$1`.
///
/// Columns missing from the object end up as `null`, while `id` and
/// `created_at` keep their defaults.
fn insert_query(collection: Collection) -> String {
    let table = collection.name();
    let columns = collection
        .columns()
        .iter()
        .map(|column| format!("\"{column}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "insert into \"{table}\" ({columns}) select {columns} from \
         json_populate_record(null::\"{table}\", $1) returning id"
    )
}
