//! gendoc library crate generating documentation comments for accessors.
//!
//! The library classifies the methods of a class into getters and setters,
//! renders a per-category comment template for each selected method, and
//! hands the resulting edits to a source model that inserts or replaces the
//! comments. Templates are stored per category and can be persisted in a
//! local `SQLite` database.

pub mod accessor;
pub mod action;
pub mod config;
pub mod doc_config;
pub mod error;
pub mod generator;
pub mod model;
pub mod persistence;
pub mod telemetry;
pub mod template;

pub use accessor::{AccessorCategory, AccessorKind, PropertyBinding};
pub use action::{ActionReport, ActionStatus, CategoryTemplates, DocGenAction};
pub use config::{GendocConfig, OperationMode};
pub use doc_config::{DocTemplateConfig, TemplateCategory, TemplateConfig, TemplateEditor};
pub use error::GendocError;
pub use generator::{CommentSynthesizer, EditMode, GeneratedEdit, GenerationOutcome};
pub use model::{ClassDescriptor, ClassDocument, MethodDescriptor, MethodId, SourceModel};
pub use template::{RenderContext, TemplateError, TemplateRenderer};
