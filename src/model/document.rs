//! JSON-backed source model.
//!
//! A class file holds one serialised [`ClassDescriptor`]. Edits are applied
//! to the in-memory copy and written back with [`ClassDocument::write`].

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::generator::{EditMode, GeneratedEdit};

use super::{
    ClassDescriptor, CommentGrammar, JavadocGrammar, MethodDescriptor, MethodId, ModelError,
    SourceModel, format_doc_comment,
};

/// In-memory source model for a single class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDocument {
    class: ClassDescriptor,
}

impl ClassDocument {
    /// Wraps a class snapshot.
    #[must_use]
    pub const fn new(class: ClassDescriptor) -> Self {
        Self { class }
    }

    /// Returns the current class state, including applied edits.
    #[must_use]
    pub const fn class(&self) -> &ClassDescriptor {
        &self.class
    }

    /// Consumes the document and returns the class.
    #[must_use]
    pub fn into_class(self) -> ClassDescriptor {
        self.class
    }

    /// Reads a class model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] when the file cannot be read and
    /// [`ModelError::Parse`] when it is not a valid class model.
    pub fn read(path: &Utf8Path) -> Result<Self, ModelError> {
        let (dir, file_name) = open_parent(path)?;
        let content = dir
            .read_to_string(file_name)
            .map_err(|error| ModelError::Io {
                path: path.to_owned(),
                message: error.to_string(),
            })?;

        let class = serde_json::from_str(&content).map_err(|error| ModelError::Parse {
            path: path.to_owned(),
            message: error.to_string(),
        })?;
        Ok(Self::new(class))
    }

    /// Writes the class model to a JSON file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] when serialisation or the write fails.
    pub fn write(&self, path: &Utf8Path) -> Result<(), ModelError> {
        let (dir, file_name) = open_parent(path)?;
        let json = serde_json::to_string_pretty(&self.class).map_err(|error| ModelError::Io {
            path: path.to_owned(),
            message: format!("failed to serialise class model: {error}"),
        })?;

        dir.write(file_name, json).map_err(|error| ModelError::Io {
            path: path.to_owned(),
            message: error.to_string(),
        })
    }

    fn method_mut(&mut self, id: MethodId) -> Result<&mut MethodDescriptor, ModelError> {
        self.class
            .methods
            .get_mut(id.index())
            .ok_or(ModelError::UnknownMethod { method: id })
    }
}

impl SourceModel for ClassDocument {
    fn subject_class(&self) -> Option<&ClassDescriptor> {
        if self.class.is_interface {
            return None;
        }
        Some(&self.class)
    }

    fn apply_edit(&mut self, edit: &GeneratedEdit) -> Result<(), ModelError> {
        let method = self.method_mut(edit.method)?;
        if method.name != edit.method_name {
            return Err(ModelError::StaleEdit {
                method: edit.method,
                expected: edit.method_name.clone(),
                actual: method.name.clone(),
            });
        }

        JavadocGrammar
            .parse(&edit.comment)
            .map_err(|source| ModelError::MalformedComment {
                method_name: method.name.clone(),
                source,
            })?;

        match edit.mode {
            EditMode::ReplaceExisting => {
                if method.doc_comment.is_none() {
                    tracing::debug!(
                        "replacing a comment on '{}' that no longer exists; inserting instead",
                        method.name
                    );
                }
            }
            EditMode::InsertBefore => {
                if method.doc_comment.is_some() {
                    tracing::debug!(
                        "inserting a comment on '{}' that already has one; replacing it",
                        method.name
                    );
                }
            }
        }
        method.doc_comment = Some(edit.comment.clone());
        Ok(())
    }

    fn reformat(&mut self, id: MethodId) -> Result<(), ModelError> {
        let method = self.method_mut(id)?;
        if let Some(comment) = method.doc_comment.as_mut() {
            *comment = format_doc_comment(comment);
        }
        Ok(())
    }
}

fn open_parent(path: &Utf8Path) -> Result<(Dir, &str), ModelError> {
    let file_name = path.file_name().ok_or_else(|| ModelError::Io {
        path: path.to_owned(),
        message: "path has no file name".to_owned(),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        ModelError::Io {
            path: Utf8PathBuf::from(parent),
            message: error.to_string(),
        }
    })?;
    Ok((dir, file_name))
}
