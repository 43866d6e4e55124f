//! Editing session over the category templates.
//!
//! An editor keeps one draft per category. Drafts start as the configured
//! templates, may be changed freely, and are only written back by
//! [`TemplateEditor::apply`], which refuses to save anything while any
//! draft is invalid.

use thiserror::Error;

use crate::template::{TemplateError, TemplateRenderer};

use super::{ConfigError, TemplateCategory, TemplateConfig};

/// Help text describing the template language and variables.
pub const PLACEHOLDER_HELP: &str = "\
Edit the template as you need. Make sure that the template is a valid javadoc comment. \
Variables may be written as Velocity-style references ($field, ${field}, $!field) or as \
Jinja2 expressions ({{ field }}), and references also work inside tags ({% if $field %}). \
Control flow uses Jinja2 tags only ({% if %}...{% else %}...{% endif %}, {% for %}...{% endfor %}): \
Velocity directives such as #if, #set or ## comments are not interpreted and are copied \
into the comment as plain text. The following variables are defined:

$field - the field name
$field_type - the field type
$class_name - the class name
$full_class_name - the full qualified class name
$project_name - the project name

Undefined variables render as empty text. The comment is reformatted after insertion.";

/// Errors raised while applying edited templates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    /// A draft does not render to a valid documentation comment.
    #[error("Template for {name} is invalid!")]
    InvalidTemplate {
        /// Display name of the offending category.
        name: &'static str,
        /// Why validation failed.
        #[source]
        source: TemplateError,
    },

    /// A valid draft could not be saved.
    #[error(transparent)]
    Save(#[from] ConfigError),
}

#[derive(Debug)]
struct Draft<C> {
    config: C,
    content: String,
}

/// Drafts for each configured category.
#[derive(Debug)]
pub struct TemplateEditor<C> {
    drafts: Vec<Draft<C>>,
}

impl<C: TemplateConfig> TemplateEditor<C> {
    /// Starts an editing session with one draft per configuration.
    pub fn new(configs: impl IntoIterator<Item = C>) -> Self {
        let drafts = configs
            .into_iter()
            .map(|config| {
                let content = config.template().to_owned();
                Draft { config, content }
            })
            .collect();
        Self { drafts }
    }

    /// Returns the draft for `category`.
    #[must_use]
    pub fn draft(&self, category: TemplateCategory) -> Option<&str> {
        self.find(category).map(|draft| draft.content.as_str())
    }

    /// Replaces the draft for `category`.
    ///
    /// Returns `false` when the editor has no configuration for `category`.
    pub fn set_draft(&mut self, category: TemplateCategory, content: &str) -> bool {
        let Some(draft) = self.find_mut(category) else {
            return false;
        };
        content.clone_into(&mut draft.content);
        true
    }

    /// Returns the configuration for `category`.
    #[must_use]
    pub fn config(&self, category: TemplateCategory) -> Option<&C> {
        self.find(category).map(|draft| &draft.config)
    }

    /// Returns true when any draft differs from its configured template.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.drafts
            .iter()
            .any(|draft| draft.content != draft.config.template())
    }

    /// Discards every draft and starts again from the configured templates.
    pub fn reset(&mut self) {
        for draft in &mut self.drafts {
            draft.config.template().clone_into(&mut draft.content);
        }
    }

    /// Replaces every draft with its category's built-in template.
    pub fn restore_defaults(&mut self) {
        for draft in &mut self.drafts {
            draft.config.default_template().clone_into(&mut draft.content);
        }
    }

    /// Validates every draft and saves them all.
    ///
    /// Drafts are validated in order before anything is saved, so an invalid
    /// draft blocks the whole apply.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidTemplate`] naming the first invalid
    /// category, or [`EditorError::Save`] when persisting a draft fails.
    pub fn apply(&mut self, renderer: &TemplateRenderer) -> Result<(), EditorError> {
        for draft in &self.drafts {
            renderer
                .check(&draft.content)
                .map_err(|source| EditorError::InvalidTemplate {
                    name: draft.config.category().config_name(),
                    source,
                })?;
        }

        for draft in &mut self.drafts {
            draft.config.save(&draft.content)?;
            tracing::debug!("saved {} template", draft.config.category());
        }
        Ok(())
    }

    /// Consumes the editor and returns the configurations.
    pub fn into_configs(self) -> Vec<C> {
        self.drafts.into_iter().map(|draft| draft.config).collect()
    }

    fn find(&self, category: TemplateCategory) -> Option<&Draft<C>> {
        self.drafts
            .iter()
            .find(|draft| draft.config.category() == category)
    }

    fn find_mut(&mut self, category: TemplateCategory) -> Option<&mut Draft<C>> {
        self.drafts
            .iter_mut()
            .find(|draft| draft.config.category() == category)
    }
}
