//! Read-only method model and the collaborator traits around it.
//!
//! The generation pipeline never walks a live syntax tree. It consumes a
//! snapshot of a class ([`ClassDescriptor`]) and hands its edits to a
//! [`SourceModel`], which owns the actual source and applies each edit in
//! whatever exclusive-write scope it provides. Method selection is likewise
//! delegated to a [`MethodSelector`].
//!
//! [`ClassDocument`] is the bundled JSON-backed source model used by the
//! command-line tool and the tests.

mod doc_comment;
mod document;
mod error;
mod selection;

use serde::{Deserialize, Serialize};

pub use doc_comment::{
    BlockTag, CommentGrammar, CommentSyntaxError, DocComment, JavadocGrammar, format_doc_comment,
};
pub use document::ClassDocument;
pub use error::ModelError;
#[cfg(test)]
pub use selection::MockMethodSelector;
pub use selection::{MethodSelector, SelectAll, SelectNamed, Selection};

use crate::generator::GeneratedEdit;

/// Annotation names recognised as the override marker.
const OVERRIDE_ANNOTATIONS: [&str; 2] = ["Override", "java.lang.Override"];

/// Position of a method within its class, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(usize);

impl MethodId {
    /// Creates an identifier for the method at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the declaration index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A single method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name as declared.
    pub name: String,
    /// Declared parameter type, e.g. `String` or `java.util.List<String>`.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Parameter {
    /// Creates a parameter from its name and type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Immutable snapshot of one method as seen by the source model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Return type, or `None` for `void`.
    pub return_type: Option<String>,
    /// Annotations attached to the method, by simple or qualified name.
    pub annotations: Vec<String>,
    /// Leading documentation comment, when one exists.
    pub doc_comment: Option<String>,
}

impl MethodDescriptor {
    /// Creates a `void` method with no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the return type.
    #[must_use]
    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, type_name));
        self
    }

    /// Appends an annotation.
    #[must_use]
    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Sets the existing documentation comment.
    #[must_use]
    pub fn documented(mut self, comment: impl Into<String>) -> Self {
        self.doc_comment = Some(comment.into());
        self
    }

    /// Returns true when the method carries the override marker.
    #[must_use]
    pub fn is_override(&self) -> bool {
        self.annotations.iter().any(|annotation| {
            let name = annotation.trim_start_matches('@');
            OVERRIDE_ANNOTATIONS.contains(&name)
        })
    }

    /// Returns true when the method already has a leading doc comment.
    #[must_use]
    pub const fn has_doc_comment(&self) -> bool {
        self.doc_comment.is_some()
    }

    /// Returns true when the method is declared `void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.return_type
            .as_deref()
            .is_none_or(|return_type| return_type.trim() == "void")
    }
}

/// Snapshot of a class and its methods in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDescriptor {
    /// Simple class name.
    pub name: String,
    /// Fully qualified class name.
    pub qualified_name: String,
    /// True for interfaces, which are never offered for generation.
    pub is_interface: bool,
    /// Methods in declaration order.
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Creates an empty class.
    pub fn new(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            ..Self::default()
        }
    }

    /// Appends a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Looks up a method by identifier.
    #[must_use]
    pub fn method(&self, id: MethodId) -> Option<&MethodDescriptor> {
        self.methods.get(id.index())
    }

    /// Iterates over methods together with their identifiers.
    pub fn methods_with_ids(&self) -> impl Iterator<Item = (MethodId, &MethodDescriptor)> {
        self.methods
            .iter()
            .enumerate()
            .map(|(index, method)| (MethodId::new(index), method))
    }

    /// Returns the identifier of the first method named `name`.
    #[must_use]
    pub fn find_method(&self, name: &str) -> Option<MethodId> {
        self.methods_with_ids()
            .find(|(_, method)| method.name == name)
            .map(|(id, _)| id)
    }

    /// Returns the identifier of `method` when it is one of this class's
    /// methods (compared by address).
    #[must_use]
    pub fn id_of(&self, method: &MethodDescriptor) -> Option<MethodId> {
        self.methods_with_ids()
            .find(|(_, candidate)| std::ptr::eq(*candidate, method))
            .map(|(id, _)| id)
    }
}

/// Source model that owns the class text and applies generated edits.
pub trait SourceModel {
    /// Returns the class under the caret, or `None` when no class applies.
    fn subject_class(&self) -> Option<&ClassDescriptor>;

    /// Replaces or inserts the leading comment of the edit's target method.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when the target does not exist or the comment
    /// text is rejected.
    fn apply_edit(&mut self, edit: &GeneratedEdit) -> Result<(), ModelError>;

    /// Reformats a method after its comment changed.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownMethod`] when the method does not exist.
    fn reformat(&mut self, method: MethodId) -> Result<(), ModelError>;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::simple("Override", true)]
    #[case::qualified("java.lang.Override", true)]
    #[case::with_at("@Override", true)]
    #[case::other("Deprecated", false)]
    fn recognises_override_marker(#[case] annotation: &str, #[case] expected: bool) {
        let method = MethodDescriptor::new("getName")
            .returning("String")
            .annotated(annotation);

        assert_eq!(method.is_override(), expected);
    }

    #[test]
    fn override_is_found_among_several_annotations() {
        let method = MethodDescriptor::new("getName")
            .annotated("Override")
            .annotated("Deprecated");

        assert!(method.is_override());
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("void"), true)]
    #[case(Some("int"), false)]
    fn void_detection(#[case] return_type: Option<&str>, #[case] expected: bool) {
        let mut method = MethodDescriptor::new("run");
        method.return_type = return_type.map(str::to_owned);

        assert_eq!(method.is_void(), expected);
    }

    #[test]
    fn deserialises_class_with_defaults() {
        let json = r#"{
            "name": "Foo",
            "qualified_name": "com.example.Foo",
            "methods": [
                {"name": "getBar", "return_type": "String"},
                {"name": "setBar", "parameters": [{"name": "v", "type": "String"}]}
            ]
        }"#;

        let class: ClassDescriptor = serde_json::from_str(json).expect("class should parse");

        assert!(!class.is_interface);
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.find_method("setBar"), Some(MethodId::new(1)));
        assert_eq!(
            class.method(MethodId::new(1)).map(|m| m.parameters.clone()),
            Some(vec![Parameter::new("v", "String")])
        );
    }

    #[test]
    fn id_of_uses_identity_not_equality() {
        let class = ClassDescriptor::new("Foo", "Foo")
            .with_method(MethodDescriptor::new("run"))
            .with_method(MethodDescriptor::new("run"));
        let second = class.methods.get(1).expect("second method");

        assert_eq!(class.id_of(second), Some(MethodId::new(1)));
        assert_eq!(class.id_of(&MethodDescriptor::new("run")), None);
    }
}
