//! Method selection collaborators.
//!
//! The interactive host shows a chooser with every candidate pre-selected
//! and an "overwrite existing documentation" toggle. The selectors here
//! reproduce that contract without any UI.

use std::collections::BTreeSet;

use super::{ClassDescriptor, MethodDescriptor, MethodId};

/// Methods confirmed by the user, plus the overwrite choice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Confirmed methods in the order they were offered.
    pub methods: Vec<MethodId>,
    /// True when existing comments should be replaced.
    pub overwrite: bool,
}

/// Chooses which of the offered methods receive generated comments.
#[cfg_attr(test, mockall::automock)]
pub trait MethodSelector {
    /// Returns the confirmed subset of `candidates`, or `None` when the user
    /// cancelled.
    fn select(&mut self, class: &ClassDescriptor, candidates: &[MethodId]) -> Option<Selection>;
}

/// Confirms every candidate, as the chooser does when accepted unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectAll {
    overwrite: bool,
}

impl SelectAll {
    /// Creates a selector with the given overwrite choice.
    #[must_use]
    pub const fn new(overwrite: bool) -> Self {
        Self { overwrite }
    }
}

impl MethodSelector for SelectAll {
    fn select(&mut self, _class: &ClassDescriptor, candidates: &[MethodId]) -> Option<Selection> {
        Some(Selection {
            methods: candidates.to_vec(),
            overwrite: self.overwrite,
        })
    }
}

/// Confirms the candidates whose names appear in a fixed list.
///
/// Names that match no candidate are ignored. An empty result is still a
/// confirmation, not a cancellation.
#[derive(Debug, Clone, Default)]
pub struct SelectNamed {
    names: BTreeSet<String>,
    overwrite: bool,
}

impl SelectNamed {
    /// Creates a selector for the given method names.
    pub fn new<I, S>(names: I, overwrite: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            overwrite,
        }
    }

    fn accepts(&self, method: &MethodDescriptor) -> bool {
        self.names.contains(&method.name)
    }
}

impl MethodSelector for SelectNamed {
    fn select(&mut self, class: &ClassDescriptor, candidates: &[MethodId]) -> Option<Selection> {
        let methods = candidates
            .iter()
            .copied()
            .filter(|id| class.method(*id).is_some_and(|method| self.accepts(method)))
            .collect();
        Some(Selection {
            methods,
            overwrite: self.overwrite,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class() -> ClassDescriptor {
        ClassDescriptor::new("Foo", "com.example.Foo")
            .with_method(MethodDescriptor::new("getBar").returning("String"))
            .with_method(MethodDescriptor::new("setBar").with_parameter("v", "String"))
            .with_method(MethodDescriptor::new("getBaz").returning("int"))
    }

    #[test]
    fn select_all_confirms_every_candidate() {
        let candidates = [MethodId::new(0), MethodId::new(2)];

        let selection = SelectAll::new(true).select(&class(), &candidates);

        assert_eq!(
            selection,
            Some(Selection {
                methods: candidates.to_vec(),
                overwrite: true,
            })
        );
    }

    #[test]
    fn select_named_keeps_offered_order() {
        let candidates = [MethodId::new(0), MethodId::new(1), MethodId::new(2)];
        let mut selector = SelectNamed::new(["getBaz", "getBar", "missing"], false);

        let selection = selector.select(&class(), &candidates);

        assert_eq!(
            selection.map(|s| s.methods),
            Some(vec![MethodId::new(0), MethodId::new(2)])
        );
    }

    #[test]
    fn select_named_only_considers_candidates() {
        let candidates = [MethodId::new(0)];
        let mut selector = SelectNamed::new(["setBar"], false);

        let selection = selector.select(&class(), &candidates);

        assert_eq!(selection.map(|s| s.methods), Some(Vec::new()));
    }
}
