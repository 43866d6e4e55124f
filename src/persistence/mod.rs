//! Local persistence and database migrations.
//!
//! Saved comment templates live in a local `SQLite` database, one row per
//! template category. The schema is managed with Diesel migrations so the
//! database can be created and upgraded consistently across machines.

mod error;
mod migrator;
mod template_store;

use diesel::Connection;
use diesel::sqlite::SqliteConnection;

pub use error::PersistenceError;
pub use migrator::{INITIAL_SCHEMA_VERSION, SchemaVersion, migrate_database};
pub use template_store::SqliteTemplateStore;

/// Opens a connection to `database_url`, ignoring surrounding whitespace.
fn connect(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let url = database_url.trim();
    if url.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }
    SqliteConnection::establish(url).map_err(|error| PersistenceError::ConnectionFailed {
        message: error.to_string(),
    })
}
