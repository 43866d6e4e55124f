//! The "generate documentation" action.
//!
//! [`DocGenAction`] ties the pipeline together for one class: it offers the
//! accessors of the requested category to a [`MethodSelector`], splits the
//! confirmed methods into getters and setters, generates comments with the
//! matching template, then applies and reformats each edit through the
//! [`SourceModel`].

use crate::accessor::{self, AccessorCategory, AccessorKind};
use crate::doc_config::TemplateConfig;
use crate::generator::{CommentSynthesizer, GeneratedEdit, GenerationOutcome};
use crate::model::{ClassDescriptor, MethodId, MethodSelector, ModelError, SourceModel};
use crate::telemetry::TelemetryEvent;

/// Templates used for each accessor kind during one run.
#[derive(Clone, Copy)]
pub struct CategoryTemplates<'a> {
    /// Template configuration for getters.
    pub getter: &'a dyn TemplateConfig,
    /// Template configuration for setters.
    pub setter: &'a dyn TemplateConfig,
}

impl<'a> CategoryTemplates<'a> {
    /// Pairs the getter and setter configurations.
    #[must_use]
    pub const fn new(getter: &'a dyn TemplateConfig, setter: &'a dyn TemplateConfig) -> Self {
        Self { getter, setter }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    /// No class was available, or it was an interface.
    NoClass,
    /// The class has no methods of the requested category.
    NoCandidates,
    /// The selector cancelled; nothing changed.
    Cancelled,
    /// Edits were generated and applied.
    Completed,
}

/// An edit that was generated but rejected by the source model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyFailure {
    /// The rejected edit.
    pub edit: GeneratedEdit,
    /// Why the source model rejected it.
    pub error: ModelError,
}

/// Summary of one action run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    /// How the run ended.
    pub status: ActionStatus,
    /// Simple name of the class, when one was available.
    pub class_name: Option<String>,
    /// Generation results across both categories.
    pub outcome: GenerationOutcome,
    /// Edits the source model refused.
    pub apply_failures: Vec<ApplyFailure>,
}

impl ActionReport {
    fn empty(status: ActionStatus, class_name: Option<String>) -> Self {
        Self {
            status,
            class_name,
            outcome: GenerationOutcome::default(),
            apply_failures: Vec::new(),
        }
    }

    /// Returns the number of edits the source model accepted.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.outcome
            .edits
            .len()
            .saturating_sub(self.apply_failures.len())
    }

    /// Returns the telemetry event summarising a completed run.
    #[must_use]
    pub fn telemetry_event(&self) -> Option<TelemetryEvent> {
        if self.status != ActionStatus::Completed {
            return None;
        }
        Some(TelemetryEvent::DocCommentsGenerated {
            class_name: self.class_name.clone().unwrap_or_default(),
            inserted: self.outcome.inserted_count(),
            replaced: self.outcome.replaced_count(),
            skipped: self.outcome.skipped.len(),
            failed: self.outcome.failures.len() + self.apply_failures.len(),
        })
    }
}

/// Generates documentation comments for one accessor category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocGenAction {
    category: AccessorCategory,
}

impl DocGenAction {
    /// Creates an action for `category`.
    #[must_use]
    pub const fn new(category: AccessorCategory) -> Self {
        Self { category }
    }

    /// Returns the requested category.
    #[must_use]
    pub const fn category(self) -> AccessorCategory {
        self.category
    }

    /// Returns the methods of `class` offered for selection, in declaration
    /// order.
    #[must_use]
    pub fn candidates(self, class: &ClassDescriptor) -> Vec<MethodId> {
        accessor::filter_by_category(&class.methods, self.category)
            .into_iter()
            .filter_map(|method| class.id_of(method))
            .collect()
    }

    /// Returns true when the model has a class with at least one candidate.
    #[must_use]
    pub fn is_enabled(self, model: &dyn SourceModel) -> bool {
        model
            .subject_class()
            .is_some_and(|class| !self.candidates(class).is_empty())
    }

    /// Runs the action against `model`.
    ///
    /// Failures for individual methods are collected in the report; the
    /// remaining edits are still applied.
    #[must_use]
    pub fn run(
        self,
        model: &mut dyn SourceModel,
        selector: &mut dyn MethodSelector,
        synthesizer: &CommentSynthesizer<'_>,
        templates: CategoryTemplates<'_>,
    ) -> ActionReport {
        let (class_name, outcome) = {
            let Some(class) = model.subject_class() else {
                tracing::debug!("no class available for {} documentation", self.category);
                return ActionReport::empty(ActionStatus::NoClass, None);
            };
            let class_name = Some(class.name.clone());

            let candidates = self.candidates(class);
            if candidates.is_empty() {
                tracing::debug!("{} has no {}", class.name, self.category);
                return ActionReport::empty(ActionStatus::NoCandidates, class_name);
            }

            let Some(selection) = selector.select(class, &candidates) else {
                tracing::debug!("selection cancelled for {}", class.name);
                return ActionReport::empty(ActionStatus::Cancelled, class_name);
            };

            let (getters, setters) = split_by_kind(class, &selection.methods);
            let mut outcome =
                synthesizer.generate(class, &getters, selection.overwrite, templates.getter);
            outcome.extend(synthesizer.generate(
                class,
                &setters,
                selection.overwrite,
                templates.setter,
            ));
            (class_name, outcome)
        };

        let apply_failures = apply_edits(model, &outcome.edits);
        ActionReport {
            status: ActionStatus::Completed,
            class_name,
            outcome,
            apply_failures,
        }
    }
}

fn split_by_kind(class: &ClassDescriptor, selected: &[MethodId]) -> (Vec<MethodId>, Vec<MethodId>) {
    let mut getters = Vec::new();
    let mut setters = Vec::new();
    for &id in selected {
        match class.method(id).map(accessor::classify) {
            Some(AccessorKind::Getter) => getters.push(id),
            Some(AccessorKind::Setter) => setters.push(id),
            Some(AccessorKind::Other) | None => {
                tracing::debug!("ignoring selected non-accessor index {}", id.index());
            }
        }
    }
    (getters, setters)
}

fn apply_edits(model: &mut dyn SourceModel, edits: &[GeneratedEdit]) -> Vec<ApplyFailure> {
    let mut failures = Vec::new();
    for edit in edits {
        let result = model
            .apply_edit(edit)
            .and_then(|()| model.reformat(edit.method));
        if let Err(error) = result {
            tracing::warn!("failed to apply comment to '{}': {error}", edit.method_name);
            failures.push(ApplyFailure {
                edit: edit.clone(),
                error,
            });
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::doc_config::{DocTemplateConfig, TemplateCategory};
    use crate::generator::EditMode;
    use crate::model::{
        ClassDocument, MethodDescriptor, MockMethodSelector, SelectAll, SelectNamed, Selection,
    };
    use crate::template::TemplateRenderer;

    #[fixture]
    fn foo() -> ClassDocument {
        ClassDocument::new(
            ClassDescriptor::new("Foo", "com.example.Foo")
                .with_method(MethodDescriptor::new("getBar").returning("int"))
                .with_method(
                    MethodDescriptor::new("setBar")
                        .with_parameter("bar", "int")
                        .documented("/** Old. */"),
                )
                .with_method(
                    MethodDescriptor::new("getName")
                        .returning("String")
                        .annotated("Override"),
                )
                .with_method(MethodDescriptor::new("isReady").returning("boolean")),
        )
    }

    fn configs() -> [DocTemplateConfig; 2] {
        let mut getter = DocTemplateConfig::with_default(TemplateCategory::Getter);
        getter.set_template("/** Returns $field. */");
        let mut setter = DocTemplateConfig::with_default(TemplateCategory::Setter);
        setter.set_template("/**\n * Sets $field.\n * @param $field the $field_type value\n */");
        [getter, setter]
    }

    fn comment_of<'a>(document: &'a ClassDocument, name: &str) -> Option<&'a str> {
        document
            .class()
            .find_method(name)
            .and_then(|id| document.class().method(id))
            .and_then(|method| method.doc_comment.as_deref())
    }

    #[rstest]
    #[case::getters(AccessorCategory::Getter, &[0, 3])]
    #[case::setters(AccessorCategory::Setter, &[1])]
    #[case::both(AccessorCategory::GetterAndSetter, &[0, 1, 3])]
    fn candidates_exclude_overrides(
        foo: ClassDocument,
        #[case] category: AccessorCategory,
        #[case] expected: &[usize],
    ) {
        let candidates = DocGenAction::new(category).candidates(foo.class());

        let indices: Vec<usize> = candidates.into_iter().map(MethodId::index).collect();
        assert_eq!(indices, expected);
    }

    #[rstest]
    fn run_documents_getters_and_setters(mut foo: ClassDocument) {
        let renderer = TemplateRenderer::new();
        let synthesizer = CommentSynthesizer::new(&renderer, "demo");
        let [getter, setter] = configs();
        let action = DocGenAction::new(AccessorCategory::GetterAndSetter);

        let report = action.run(
            &mut foo,
            &mut SelectAll::new(true),
            &synthesizer,
            CategoryTemplates::new(&getter, &setter),
        );

        assert_eq!(report.status, ActionStatus::Completed);
        assert_eq!(report.applied_count(), 3);
        assert_eq!(comment_of(&foo, "getBar"), Some("/** Returns bar. */"));
        assert_eq!(comment_of(&foo, "isReady"), Some("/** Returns ready. */"));
        assert_eq!(
            comment_of(&foo, "setBar"),
            Some("/**\n * Sets bar.\n * @param bar the int value\n */")
        );
        assert_eq!(comment_of(&foo, "getName"), None);
        assert_eq!(
            report.telemetry_event(),
            Some(TelemetryEvent::DocCommentsGenerated {
                class_name: "Foo".to_owned(),
                inserted: 2,
                replaced: 1,
                skipped: 0,
                failed: 0,
            })
        );
    }

    #[rstest]
    fn run_keeps_existing_comments_without_overwrite(mut foo: ClassDocument) {
        let renderer = TemplateRenderer::new();
        let synthesizer = CommentSynthesizer::new(&renderer, "demo");
        let [getter, setter] = configs();

        let report = DocGenAction::new(AccessorCategory::Setter).run(
            &mut foo,
            &mut SelectAll::new(false),
            &synthesizer,
            CategoryTemplates::new(&getter, &setter),
        );

        assert_eq!(report.outcome.skipped, vec![MethodId::new(1)]);
        assert!(report.outcome.edits.is_empty());
        assert_eq!(comment_of(&foo, "setBar"), Some("/** Old. */"));
    }

    #[rstest]
    fn run_honours_named_selection(mut foo: ClassDocument) {
        let renderer = TemplateRenderer::new();
        let synthesizer = CommentSynthesizer::new(&renderer, "demo");
        let [getter, setter] = configs();

        let report = DocGenAction::new(AccessorCategory::Getter).run(
            &mut foo,
            &mut SelectNamed::new(["isReady"], false),
            &synthesizer,
            CategoryTemplates::new(&getter, &setter),
        );

        let modes: Vec<EditMode> = report.outcome.edits.iter().map(|edit| edit.mode).collect();
        assert_eq!(modes, [EditMode::InsertBefore]);
        assert_eq!(comment_of(&foo, "getBar"), None);
    }

    #[rstest]
    fn cancelled_selection_changes_nothing(mut foo: ClassDocument) {
        let renderer = TemplateRenderer::new();
        let synthesizer = CommentSynthesizer::new(&renderer, "demo");
        let [getter, setter] = configs();
        let before = foo.clone();
        let mut selector = MockMethodSelector::new();
        selector
            .expect_select()
            .times(1)
            .returning(|_, _| None);

        let report = DocGenAction::new(AccessorCategory::GetterAndSetter).run(
            &mut foo,
            &mut selector,
            &synthesizer,
            CategoryTemplates::new(&getter, &setter),
        );

        assert_eq!(report.status, ActionStatus::Cancelled);
        assert_eq!(report.telemetry_event(), None);
        assert_eq!(foo, before);
    }

    #[rstest]
    fn selected_overridden_getter_is_ignored(mut foo: ClassDocument) {
        let renderer = TemplateRenderer::new();
        let synthesizer = CommentSynthesizer::new(&renderer, "demo");
        let [getter, setter] = configs();
        let mut selector = MockMethodSelector::new();
        selector.expect_select().returning(|_, _| {
            Some(Selection {
                methods: vec![MethodId::new(2), MethodId::new(0)],
                overwrite: false,
            })
        });

        let report = DocGenAction::new(AccessorCategory::Getter).run(
            &mut foo,
            &mut selector,
            &synthesizer,
            CategoryTemplates::new(&getter, &setter),
        );

        assert_eq!(report.outcome.edits.len(), 1);
        assert_eq!(comment_of(&foo, "getName"), None);
    }

    #[rstest]
    fn invalid_rendered_comment_is_reported_and_others_applied(mut foo: ClassDocument) {
        let renderer = TemplateRenderer::new();
        let synthesizer = CommentSynthesizer::new(&renderer, "demo");
        let [_, setter] = configs();
        let mut getter = DocTemplateConfig::with_default(TemplateCategory::Getter);
        getter.set_template("{% if field == 'bar' %}not a comment{% else %}/** ok */{% endif %}");

        let report = DocGenAction::new(AccessorCategory::Getter).run(
            &mut foo,
            &mut SelectAll::new(false),
            &synthesizer,
            CategoryTemplates::new(&getter, &setter),
        );

        assert_eq!(report.apply_failures.len(), 1);
        assert!(matches!(
            report.apply_failures.first().map(|failure| &failure.error),
            Some(ModelError::MalformedComment { .. })
        ));
        assert_eq!(comment_of(&foo, "getBar"), None);
        assert_eq!(comment_of(&foo, "isReady"), Some("/** ok */"));
        assert_eq!(report.applied_count(), 1);
    }

    #[test]
    fn interface_disables_action() {
        let mut class = ClassDescriptor::new("Api", "com.example.Api")
            .with_method(MethodDescriptor::new("getValue").returning("int"));
        class.is_interface = true;
        let document = ClassDocument::new(class);

        assert!(!DocGenAction::new(AccessorCategory::Getter).is_enabled(&document));
    }

    #[rstest]
    fn action_enabled_only_with_candidates(foo: ClassDocument) {
        assert!(DocGenAction::new(AccessorCategory::Setter).is_enabled(&foo));

        let bare = ClassDocument::new(
            ClassDescriptor::new("Bare", "Bare").with_method(MethodDescriptor::new("run")),
        );
        assert!(!DocGenAction::new(AccessorCategory::GetterAndSetter).is_enabled(&bare));
    }

    #[test]
    fn missing_class_yields_empty_report() {
        let mut class = ClassDescriptor::new("Api", "com.example.Api");
        class.is_interface = true;
        let mut document = ClassDocument::new(class);
        let renderer = TemplateRenderer::new();
        let synthesizer = CommentSynthesizer::new(&renderer, "demo");
        let [getter, setter] = configs();
        let mut selector = MockMethodSelector::new();
        selector.expect_select().never();

        let report = DocGenAction::new(AccessorCategory::Getter).run(
            &mut document,
            &mut selector,
            &synthesizer,
            CategoryTemplates::new(&getter, &setter),
        );

        assert_eq!(report.status, ActionStatus::NoClass);
        assert_eq!(report.class_name, None);
    }
}
