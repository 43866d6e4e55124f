//! Comment templates persisted in `SQLite`.
//!
//! Each category's template is stored under its storage key in the
//! `doc_templates` table. A fresh connection is opened per call; the store
//! holds only the database URL.

use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;

use crate::doc_config::{TemplateCategory, TemplateStore};

use super::{PersistenceError, connect};

const DOC_TEMPLATES_TABLE: &str = "doc_templates";

/// SQLite-backed template store.
#[derive(Debug, Clone)]
pub struct SqliteTemplateStore {
    database_url: String,
}

impl SqliteTemplateStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        connect(&self.database_url)
    }

    fn templates_table_exists(
        connection: &mut SqliteConnection,
    ) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            count: i64,
        }

        let row: Row = sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind::<Text, _>(DOC_TEMPLATES_TABLE)
        .get_result(connection)?;

        Ok(row.count > 0)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::templates_table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }
}

impl TemplateStore for SqliteTemplateStore {
    fn load(&self, category: TemplateCategory) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            template: String,
        }

        let mut connection = self.establish_connection()?;

        let result: Option<Row> =
            sql_query("SELECT template FROM doc_templates WHERE category = ? LIMIT 1;")
                .bind::<Text, _>(category.storage_key())
                .get_result(&mut connection)
                .optional()
                .map_err(|error| {
                    Self::map_error_with_schema_check(&mut connection, &error, |message| {
                        PersistenceError::QueryFailed { message }
                    })
                })?;

        Ok(result.map(|row| row.template))
    }

    fn save(&self, category: TemplateCategory, template: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO doc_templates (category, template) VALUES (?, ?) \
             ON CONFLICT(category) DO UPDATE SET \
               template = excluded.template, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(category.storage_key())
        .bind::<Text, _>(template)
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| {
            Self::map_error_with_schema_check(&mut connection, &error, |message| {
                PersistenceError::WriteFailed { message }
            })
        })?;

        tracing::debug!("stored {category} template under {}", category.storage_key());
        Ok(())
    }
}
