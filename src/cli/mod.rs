//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`generate`]: Generate comments for a class model
//! - [`migrations`]: Database schema migrations
//! - [`templates`]: Show or save the category templates
//!
//! Output formatting utilities are in [`output`].

use std::sync::Arc;

use gendoc::GendocError;
use gendoc::doc_config::{InMemoryTemplateStore, TemplateStore};
use gendoc::persistence::{PersistenceError, SqliteTemplateStore};

pub mod generate;
pub mod migrations;
pub mod output;
pub mod templates;

/// Opens the configured template store.
///
/// Without a database URL the built-in templates are served from memory.
///
/// # Errors
///
/// Returns [`GendocError::Configuration`] when the database URL is blank.
pub fn open_template_store(
    database_url: Option<&str>,
) -> Result<Arc<dyn TemplateStore>, GendocError> {
    let Some(url) = database_url else {
        return Ok(Arc::new(InMemoryTemplateStore::default()));
    };
    let store = SqliteTemplateStore::new(url).map_err(|error| map_persistence_error(&error))?;
    Ok(Arc::new(store))
}

/// Maps a persistence error to a CLI error.
///
/// Configuration-related errors (blank URL) become
/// [`GendocError::Configuration`], while runtime errors (connection,
/// migration, query failures) stay [`GendocError::Persistence`].
pub fn map_persistence_error(error: &PersistenceError) -> GendocError {
    if is_configuration_error(error) {
        GendocError::Configuration {
            message: error.to_string(),
        }
    } else {
        GendocError::Persistence(error.clone())
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}
