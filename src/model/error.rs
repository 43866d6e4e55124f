//! Error types for source model operations.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::{CommentSyntaxError, MethodId};

/// Errors raised while loading a class model or applying edits to it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The edit targets a method the class does not declare.
    #[error("no method with index {} in this class", .method.index())]
    UnknownMethod {
        /// The identifier that failed to resolve.
        method: MethodId,
    },

    /// The edit targets a method whose name no longer matches the snapshot.
    #[error("method {} is '{actual}', but the edit targets '{expected}'", .method.index())]
    StaleEdit {
        /// The identifier carried by the edit.
        method: MethodId,
        /// Method name recorded in the edit.
        expected: String,
        /// Method name currently at that position.
        actual: String,
    },

    /// The comment text is not a well-formed documentation comment.
    #[error("comment for '{method_name}' is malformed: {source}")]
    MalformedComment {
        /// Name of the method the comment was meant for.
        method_name: String,
        /// Parser failure.
        #[source]
        source: CommentSyntaxError,
    },

    /// Reading or writing the class file failed.
    #[error("failed to access class file '{path}': {message}")]
    Io {
        /// Path of the class file.
        path: Utf8PathBuf,
        /// Error detail from the file system.
        message: String,
    },

    /// The class file does not contain a valid class model.
    #[error("failed to parse class file '{path}': {message}")]
    Parse {
        /// Path of the class file.
        path: Utf8PathBuf,
        /// Error detail from the JSON parser.
        message: String,
    },
}
