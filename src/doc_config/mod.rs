//! Per-category comment templates.
//!
//! Each accessor category (getter, setter) has one [`TemplateConfig`]
//! holding its current template. [`DocTemplateConfig`] loads the template
//! from a [`TemplateStore`] and falls back to the built-in default when
//! nothing usable is stored.
//!
//! Saving persists first and only then replaces the in-memory template, so a
//! failed save never disturbs the template that is already in use.

mod editor;
mod store;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accessor::AccessorKind;
use crate::persistence::PersistenceError;

pub use editor::{EditorError, PLACEHOLDER_HELP, TemplateEditor};
#[cfg(test)]
pub use store::MockTemplateStore;
pub use store::{InMemoryTemplateStore, TemplateStore};

/// Built-in getter template.
pub const DEFAULT_GETTER_TEMPLATE: &str = "/**\n * Getter for field $field.\n *\n * @return the value of the field.\n */";

/// Built-in setter template.
pub const DEFAULT_SETTER_TEMPLATE: &str = "/**\n * Setter for field $field.\n *\n * @param $field the value to set for the field.\n */";

/// Template category, one per accessor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    /// Template for getters.
    Getter,
    /// Template for setters.
    Setter,
}

impl TemplateCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 2] = [Self::Getter, Self::Setter];

    /// Returns the display name shown to users.
    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Getter => "Getter",
            Self::Setter => "Setter",
        }
    }

    /// Returns the key the template is stored under.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Getter => "gendoc.getter.template",
            Self::Setter => "gendoc.setter.template",
        }
    }

    /// Returns the built-in template.
    #[must_use]
    pub const fn default_template(self) -> &'static str {
        match self {
            Self::Getter => DEFAULT_GETTER_TEMPLATE,
            Self::Setter => DEFAULT_SETTER_TEMPLATE,
        }
    }

    /// Returns the category whose template documents `kind`.
    #[must_use]
    pub const fn for_kind(kind: AccessorKind) -> Option<Self> {
        match kind {
            AccessorKind::Getter => Some(Self::Getter),
            AccessorKind::Setter => Some(Self::Setter),
            AccessorKind::Other => None,
        }
    }

    /// Returns the accessor kind this category documents.
    #[must_use]
    pub const fn kind(self) -> AccessorKind {
        match self {
            Self::Getter => AccessorKind::Getter,
            Self::Setter => AccessorKind::Setter,
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

impl FromStr for TemplateCategory {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.config_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownCategory {
                name: s.to_owned(),
            })
    }
}

/// Errors raised by template configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Persisting a template failed.
    #[error("failed to save {name} template: {source}")]
    SaveFailed {
        /// Display name of the category.
        name: &'static str,
        /// Underlying storage failure.
        #[source]
        source: PersistenceError,
    },

    /// A category name was not recognised.
    #[error("unknown template category '{name}': valid options are 'getter' or 'setter'")]
    UnknownCategory {
        /// The name that failed to parse.
        name: String,
    },
}

/// Source and sink of one category's template.
pub trait TemplateConfig {
    /// Returns the category this configuration belongs to.
    fn category(&self) -> TemplateCategory;

    /// Returns the current template.
    fn template(&self) -> &str;

    /// Returns the built-in template.
    fn default_template(&self) -> &str {
        self.category().default_template()
    }

    /// Returns the display name of the category.
    fn config_name(&self) -> &str {
        self.category().config_name()
    }

    /// Replaces the current template in memory without persisting it.
    fn set_template(&mut self, template: &str);

    /// Persists `template` and makes it current.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SaveFailed`] when the store rejects the write;
    /// the current template is left unchanged.
    fn save(&mut self, template: &str) -> Result<(), ConfigError>;
}

/// Template configuration backed by a [`TemplateStore`].
#[derive(Clone)]
pub struct DocTemplateConfig {
    category: TemplateCategory,
    template: String,
    store: Arc<dyn TemplateStore>,
}

impl fmt::Debug for DocTemplateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocTemplateConfig")
            .field("category", &self.category)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl DocTemplateConfig {
    /// Loads the template for `category` from `store`.
    ///
    /// A missing or blank stored template yields the built-in default, as
    /// does a store failure, which is logged.
    #[must_use]
    pub fn load(category: TemplateCategory, store: Arc<dyn TemplateStore>) -> Self {
        let template = match store.load(category) {
            Ok(Some(stored)) if !stored.trim().is_empty() => stored,
            Ok(_) => category.default_template().to_owned(),
            Err(error) => {
                tracing::warn!(
                    "failed to load {} template, using the default: {error}",
                    category.config_name()
                );
                category.default_template().to_owned()
            }
        };
        Self {
            category,
            template,
            store,
        }
    }

    /// Creates a configuration holding the default template, backed by a
    /// fresh in-memory store.
    #[must_use]
    pub fn with_default(category: TemplateCategory) -> Self {
        Self::load(category, Arc::new(InMemoryTemplateStore::default()))
    }

    /// Loads both categories from one store, getter first.
    #[must_use]
    pub fn load_all(store: &Arc<dyn TemplateStore>) -> [Self; 2] {
        TemplateCategory::ALL.map(|category| Self::load(category, Arc::clone(store)))
    }
}

impl TemplateConfig for DocTemplateConfig {
    fn category(&self) -> TemplateCategory {
        self.category
    }

    fn template(&self) -> &str {
        &self.template
    }

    fn set_template(&mut self, template: &str) {
        template.clone_into(&mut self.template);
    }

    fn save(&mut self, template: &str) -> Result<(), ConfigError> {
        self.store
            .save(self.category, template)
            .map_err(|source| ConfigError::SaveFailed {
                name: self.category.config_name(),
                source,
            })?;
        self.set_template(template);
        Ok(())
    }
}
