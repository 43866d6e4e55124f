//! Errors surfaced by the command-line tool.

use thiserror::Error;

use crate::doc_config::{ConfigError, EditorError};
use crate::model::ModelError;
use crate::persistence::PersistenceError;

/// Errors reported to the user by the `gendoc` binary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GendocError {
    /// Configuration was missing, blank, or could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// A supplied template does not produce a valid documentation comment.
    #[error("{message}")]
    InvalidTemplate {
        /// Validation failure, naming the category.
        message: String,
    },

    /// The template database could not be opened, migrated, or queried.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The class model could not be read, edited, or written.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<ConfigError> for GendocError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::SaveFailed { source, .. } => Self::Persistence(source),
            ConfigError::UnknownCategory { .. } => Self::Configuration {
                message: error.to_string(),
            },
        }
    }
}

impl From<EditorError> for GendocError {
    fn from(error: EditorError) -> Self {
        match error {
            EditorError::InvalidTemplate { name, source } => Self::InvalidTemplate {
                message: format!("Template for {name} is invalid! {source}"),
            },
            EditorError::Save(save_error) => save_error.into(),
        }
    }
}
