//! Comment template rendering using Jinja2-compatible syntax.
//!
//! Templates are rendered with `MiniJinja`. Besides the usual `{{ field }}`
//! interpolation and `{% if %}` / `{% for %}` blocks, Velocity-style
//! references (`$field`, `${field}`, `$!field`) are accepted and rewritten
//! to interpolations before compilation.
//!
//! # Available Variables
//!
//! - `field` — property name derived from the accessor
//! - `field_type` — property type (getter return type, setter parameter type)
//! - `class_name` — simple name of the owning class
//! - `full_class_name` — fully qualified name of the owning class
//! - `project_name` — project identifier supplied by the caller
//!
//! # Undefined Variables
//!
//! A placeholder that is not in the context renders as empty text instead
//! of failing, so rendering only fails on template syntax errors or runtime
//! errors such as an unknown filter. [`TemplateRenderer::validate`] is
//! therefore the place where structurally broken output is caught: it
//! renders against a fixed context and parses the result as a comment.

mod syntax;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use thiserror::Error;

use crate::accessor;
use crate::model::{
    ClassDescriptor, CommentGrammar, CommentSyntaxError, JavadocGrammar, MethodDescriptor,
};

use syntax::translate_references;

/// Variables available to a comment template for one target method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    /// Property name; absent when the method is not an accessor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Property type; absent when the method is not an accessor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Simple name of the owning class.
    pub class_name: String,
    /// Fully qualified name of the owning class.
    pub full_class_name: String,
    /// Project identifier.
    pub project_name: String,
}

impl RenderContext {
    /// Builds the context for `method` declared in `class`.
    #[must_use]
    pub fn for_method(
        class: &ClassDescriptor,
        method: &MethodDescriptor,
        project_name: &str,
    ) -> Self {
        let binding = accessor::binding(method);
        let (field, field_type) = binding
            .map(|binding| (binding.name, binding.type_name))
            .unzip();
        Self {
            field,
            field_type,
            class_name: class.name.clone(),
            full_class_name: class.qualified_name.clone(),
            project_name: project_name.to_owned(),
        }
    }

    /// Returns the fixed context used for template validation.
    #[must_use]
    pub fn synthetic() -> Self {
        Self {
            field: Some("testName".to_owned()),
            field_type: Some("int".to_owned()),
            class_name: "MyClass".to_owned(),
            full_class_name: "com.test.MyClass".to_owned(),
            project_name: "test-project".to_owned(),
        }
    }
}

/// Errors raised while rendering or validating a comment template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The template source failed to parse.
    #[error("invalid template syntax: {message}")]
    InvalidSyntax {
        /// Human-readable parser message from `MiniJinja`.
        message: String,
    },

    /// Rendering failed after successful parsing.
    #[error("template rendering failed: {message}")]
    RenderFailed {
        /// Human-readable rendering failure from `MiniJinja`.
        message: String,
    },

    /// The rendered text is not a well-formed documentation comment.
    #[error("rendered template is not a valid documentation comment: {0}")]
    MalformedComment(#[from] CommentSyntaxError),
}

/// Renders comment templates.
///
/// The renderer is explicitly owned by its caller; there is no process-wide
/// engine. It holds no mutable state, so one instance can be shared across
/// threads and rendering the same template with the same context always
/// yields the same text.
#[derive(Debug)]
pub struct TemplateRenderer {
    environment: Environment<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a renderer with auto-escaping disabled and lenient handling
    /// of undefined variables.
    #[must_use]
    pub fn new() -> Self {
        let mut environment = Environment::new();
        environment.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
        environment.set_undefined_behavior(UndefinedBehavior::Chainable);
        environment.set_keep_trailing_newline(true);
        Self { environment }
    }

    /// Renders `template` with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::InvalidSyntax`] when the template fails to
    /// parse, or [`TemplateError::RenderFailed`] when evaluation fails.
    pub fn render(&self, template: &str, context: &RenderContext) -> Result<String, TemplateError> {
        let source = translate_references(template);
        let compiled = self
            .environment
            .template_from_str(&source)
            .map_err(|error| TemplateError::InvalidSyntax {
                message: error.to_string(),
            })?;

        compiled
            .render(context)
            .map_err(|error| TemplateError::RenderFailed {
                message: error.to_string(),
            })
    }

    /// Returns true when `template` renders against the synthetic context
    /// and the result is a well-formed Javadoc comment.
    #[must_use]
    pub fn validate(&self, template: &str) -> bool {
        self.check(template).is_ok()
    }

    /// Like [`validate`](Self::validate), but checks the output against
    /// `grammar`.
    #[must_use]
    pub fn validate_with(&self, template: &str, grammar: &dyn CommentGrammar) -> bool {
        self.check_with(template, grammar).is_ok()
    }

    /// Validates `template` and reports why it is invalid.
    ///
    /// # Errors
    ///
    /// Returns the rendering failure, or [`TemplateError::MalformedComment`]
    /// when the rendered text is not a Javadoc comment.
    pub fn check(&self, template: &str) -> Result<(), TemplateError> {
        self.check_with(template, &JavadocGrammar)
    }

    /// Validates `template` against `grammar` and reports why it is invalid.
    ///
    /// # Errors
    ///
    /// Returns the rendering failure, or [`TemplateError::MalformedComment`]
    /// when `grammar` rejects the rendered text.
    pub fn check_with(
        &self,
        template: &str,
        grammar: &dyn CommentGrammar,
    ) -> Result<(), TemplateError> {
        let rendered = self.render(template, &RenderContext::synthetic())?;
        grammar.parse(&rendered)?;
        Ok(())
    }
}
