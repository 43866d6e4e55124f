//! Database migration operations.

use gendoc::persistence::{PersistenceError, migrate_database};
use gendoc::telemetry::StderrJsonlTelemetrySink;
use gendoc::{GendocConfig, GendocError};

use super::map_persistence_error;

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`GendocError::Configuration`] if the database URL is missing or
/// blank, and [`GendocError::Persistence`] for connection or migration
/// failures.
pub fn run(config: &GendocConfig) -> Result<(), GendocError> {
    let database_url =
        config
            .database_url
            .as_deref()
            .ok_or_else(|| GendocError::Configuration {
                message: PersistenceError::MissingDatabaseUrl.to_string(),
            })?;

    let telemetry = StderrJsonlTelemetrySink;
    migrate_database(database_url, &telemetry)
        .map(drop)
        .map_err(|error| map_persistence_error(&error))
}
