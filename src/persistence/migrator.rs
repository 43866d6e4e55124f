//! Diesel-backed migration runner for the template database.

use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::{PersistenceError, connect};

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Version of the migration that creates the `doc_templates` table.
pub const INITIAL_SCHEMA_VERSION: &str = "20261001000000";

/// The newest applied migration version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Returns the version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Brings the template database at `database_url` up to date.
///
/// Already-applied migrations are skipped, so running this repeatedly is
/// harmless. Each successful run records the resulting schema version.
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] for a blank URL and another
/// [`PersistenceError`] when connecting, migrating, or reading back the
/// schema version fails. Nothing is recorded on failure.
pub fn migrate_database(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<SchemaVersion, PersistenceError> {
    let mut connection = connect(database_url)?;

    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| PersistenceError::MigrationFailed {
            message: error.to_string(),
        })?;
    tracing::debug!("applied {} pending migration(s)", applied.len());

    let version = latest_version(&mut connection)?;
    telemetry.record(TelemetryEvent::SchemaVersionRecorded {
        schema_version: version.as_str().to_owned(),
    });
    Ok(version)
}

fn latest_version(connection: &mut SqliteConnection) -> Result<SchemaVersion, PersistenceError> {
    #[derive(Debug, QueryableByName)]
    struct VersionRow {
        #[diesel(sql_type = Text)]
        version: String,
    }

    sql_query("SELECT version FROM __diesel_schema_migrations ORDER BY version DESC LIMIT 1;")
        .get_result::<VersionRow>(connection)
        .optional()
        .map_err(|error| PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        })?
        .map(|row| SchemaVersion(row.version))
        .ok_or(PersistenceError::MissingSchemaVersion)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::{INITIAL_SCHEMA_VERSION, migrate_database};
    use crate::persistence::PersistenceError;
    use crate::telemetry::test_support::RecordingTelemetrySink;
    use crate::telemetry::{NoopTelemetrySink, TelemetryEvent};

    #[test]
    fn in_memory_migration_reports_initial_version() {
        let telemetry = RecordingTelemetrySink::default();

        let version = migrate_database(":memory:", &telemetry).expect("migration should succeed");

        assert_eq!(version.as_str(), INITIAL_SCHEMA_VERSION);
        assert_eq!(
            telemetry.take(),
            vec![TelemetryEvent::SchemaVersionRecorded {
                schema_version: INITIAL_SCHEMA_VERSION.to_owned(),
            }]
        );
    }

    #[test]
    fn rerunning_migrations_keeps_the_version() {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let url = temp_dir
            .path()
            .join("gendoc.sqlite")
            .to_string_lossy()
            .into_owned();

        let first = migrate_database(&url, &NoopTelemetrySink).expect("first run");
        let second = migrate_database(&url, &NoopTelemetrySink).expect("second run");

        assert_eq!(first, second);
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn blank_url_is_rejected_without_telemetry(#[case] database_url: &str) {
        let telemetry = RecordingTelemetrySink::default();

        let result = migrate_database(database_url, &telemetry);

        assert_eq!(result, Err(PersistenceError::BlankDatabaseUrl));
        assert!(telemetry.take().is_empty());
    }
}
