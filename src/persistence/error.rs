//! Error types for template persistence.

use thiserror::Error;

/// Errors returned while opening, migrating, or querying the template
/// database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// No database URL/path was provided.
    #[error("database URL is required (use --database-url or GENDOC_DATABASE_URL)")]
    MissingDatabaseUrl,

    /// The database URL/path was present but blank.
    #[error("database URL must not be blank")]
    BlankDatabaseUrl,

    /// Establishing a `SQLite` connection failed.
    #[error("failed to connect to SQLite database: {message}")]
    ConnectionFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Running pending migrations failed.
    #[error("failed to run database migrations: {message}")]
    MigrationFailed {
        /// Error detail from Diesel migrations.
        message: String,
    },

    /// Reading the schema version from the migration table failed.
    #[error("failed to read schema version after migrations: {message}")]
    SchemaVersionQueryFailed {
        /// Error detail from Diesel query execution.
        message: String,
    },

    /// The migrations completed but no schema version could be found.
    #[error("no schema version recorded after migrations ran")]
    MissingSchemaVersion,

    /// The template table does not exist; migrations have not run.
    #[error("template storage is not initialised (run with --migrate-db first)")]
    SchemaNotInitialised,

    /// Reading a stored template failed.
    #[error("failed to read stored template: {message}")]
    QueryFailed {
        /// Error detail from Diesel.
        message: String,
    },

    /// Writing a template failed.
    #[error("failed to write template: {message}")]
    WriteFailed {
        /// Error detail from Diesel.
        message: String,
    },
}
