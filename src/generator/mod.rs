//! Documentation comment synthesis.
//!
//! [`CommentSynthesizer::generate`] walks the selected methods in the order
//! given, applies the overwrite policy, renders the category template for
//! each remaining method and emits one [`GeneratedEdit`] per method. Edits
//! are independent of each other: the source model may apply them one at a
//! time, and a method whose template fails to render is reported in
//! [`GenerationOutcome::failures`] without affecting the others.
//!
//! The synthesizer never touches the source and never reformats; both are
//! the source model's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::doc_config::TemplateConfig;
use crate::model::{ClassDescriptor, MethodId};
use crate::template::{RenderContext, TemplateError, TemplateRenderer};

/// How an edit changes the method's leading comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Replace the existing documentation comment.
    ReplaceExisting,
    /// Insert a new comment before the method.
    InsertBefore,
}

/// A single replace-or-insert of one method's documentation comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEdit {
    /// Target method.
    pub method: MethodId,
    /// Target method name, used to detect stale edits.
    pub method_name: String,
    /// Rendered comment text.
    pub comment: String,
    /// Whether the comment replaces an existing one.
    pub mode: EditMode,
}

/// Why no edit could be produced for a selected method.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The selected identifier does not belong to the class.
    #[error("no method with index {} in class", .0.index())]
    UnknownMethod(MethodId),

    /// The template failed to render for this method.
    #[error("failed to render comment for '{method_name}': {source}")]
    Template {
        /// Method whose comment failed to render.
        method_name: String,
        /// Rendering failure.
        #[source]
        source: TemplateError,
    },
}

/// A selected method for which no edit was produced because of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// The selected method.
    pub method: MethodId,
    /// What went wrong.
    pub error: GenerationError,
}

/// Result of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// One edit per processed method, in selection order.
    pub edits: Vec<GeneratedEdit>,
    /// Methods left untouched because they already have a comment and
    /// overwriting was not requested.
    pub skipped: Vec<MethodId>,
    /// Methods that were processed but could not be rendered.
    pub failures: Vec<GenerationFailure>,
}

impl GenerationOutcome {
    /// Appends the results of another pass.
    pub fn extend(&mut self, other: Self) {
        self.edits.extend(other.edits);
        self.skipped.extend(other.skipped);
        self.failures.extend(other.failures);
    }

    /// Returns the number of edits that replace an existing comment.
    #[must_use]
    pub fn replaced_count(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| edit.mode == EditMode::ReplaceExisting)
            .count()
    }

    /// Returns the number of edits that insert a new comment.
    #[must_use]
    pub fn inserted_count(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| edit.mode == EditMode::InsertBefore)
            .count()
    }
}

/// Produces comment edits for a batch of methods.
#[derive(Debug)]
pub struct CommentSynthesizer<'a> {
    renderer: &'a TemplateRenderer,
    project_name: String,
}

impl<'a> CommentSynthesizer<'a> {
    /// Creates a synthesizer rendering with `renderer` for `project_name`.
    #[must_use]
    pub fn new(renderer: &'a TemplateRenderer, project_name: impl Into<String>) -> Self {
        Self {
            renderer,
            project_name: project_name.into(),
        }
    }

    /// Returns the project name placed in every render context.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Generates comment edits for `selected` methods of `class`.
    ///
    /// A method that already has a comment is skipped unless `overwrite` is
    /// set. Methods that are not accessors are still rendered, with `field`
    /// and `field_type` left undefined.
    #[must_use]
    pub fn generate(
        &self,
        class: &ClassDescriptor,
        selected: &[MethodId],
        overwrite: bool,
        config: &dyn TemplateConfig,
    ) -> GenerationOutcome {
        let mut outcome = GenerationOutcome::default();
        let template = config.template();

        for &id in selected {
            let Some(method) = class.method(id) else {
                tracing::warn!("skipping unknown method index {} in {}", id.index(), class.name);
                outcome.failures.push(GenerationFailure {
                    method: id,
                    error: GenerationError::UnknownMethod(id),
                });
                continue;
            };

            let has_existing_comment = method.has_doc_comment();
            if has_existing_comment && !overwrite {
                tracing::debug!("keeping existing comment on {}.{}", class.name, method.name);
                outcome.skipped.push(id);
                continue;
            }

            let context = RenderContext::for_method(class, method, &self.project_name);
            match self.renderer.render(template, &context) {
                Ok(comment) => {
                    let mode = if has_existing_comment {
                        EditMode::ReplaceExisting
                    } else {
                        EditMode::InsertBefore
                    };
                    tracing::debug!(
                        "generated {} comment for {}.{} ({mode:?})",
                        config.config_name(),
                        class.name,
                        method.name
                    );
                    outcome.edits.push(GeneratedEdit {
                        method: id,
                        method_name: method.name.clone(),
                        comment,
                        mode,
                    });
                }
                Err(source) => {
                    tracing::warn!(
                        "failed to render {} comment for {}.{}: {source}",
                        config.config_name(),
                        class.name,
                        method.name
                    );
                    outcome.failures.push(GenerationFailure {
                        method: id,
                        error: GenerationError::Template {
                            method_name: method.name.clone(),
                            source,
                        },
                    });
                }
            }
        }

        outcome
    }
}
