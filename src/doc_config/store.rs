//! Template persistence seam.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::persistence::PersistenceError;

use super::TemplateCategory;

/// Persistent storage for templates, keyed by category.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore {
    /// Returns the stored template for `category`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the storage cannot be read.
    fn load(&self, category: TemplateCategory) -> Result<Option<String>, PersistenceError>;

    /// Stores `template` for `category`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails.
    fn save(&self, category: TemplateCategory, template: &str) -> Result<(), PersistenceError>;
}

/// Template store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    templates: Mutex<HashMap<TemplateCategory, String>>,
}

impl TemplateStore for InMemoryTemplateStore {
    fn load(&self, category: TemplateCategory) -> Result<Option<String>, PersistenceError> {
        let templates = self.templates.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(templates.get(&category).cloned())
    }

    fn save(&self, category: TemplateCategory, template: &str) -> Result<(), PersistenceError> {
        let mut templates = self.templates.lock().unwrap_or_else(PoisonError::into_inner);
        templates.insert(category, template.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_round_trips_per_category() {
        let store = InMemoryTemplateStore::default();

        store
            .save(TemplateCategory::Getter, "/** get */")
            .expect("save should succeed");

        assert_eq!(
            store.load(TemplateCategory::Getter),
            Ok(Some("/** get */".to_owned()))
        );
        assert_eq!(store.load(TemplateCategory::Setter), Ok(None));
    }
}
