//! Comment generation for a class model file.

use std::io::{self, Write};

use camino::Utf8Path;
use gendoc::action::{ActionReport, CategoryTemplates, DocGenAction};
use gendoc::doc_config::DocTemplateConfig;
use gendoc::model::{MethodSelector, SelectAll, SelectNamed};
use gendoc::telemetry::{StderrJsonlTelemetrySink, TelemetrySink};
use gendoc::{ClassDocument, CommentSynthesizer, GendocConfig, GendocError, TemplateRenderer};

use super::open_template_store;
use super::output::{write_edits_jsonl, write_report_summary};

/// Generates comments for the configured class model.
///
/// # Errors
///
/// Returns [`GendocError::Configuration`] for missing or invalid settings and
/// [`GendocError::Model`] when the class model cannot be read or written.
pub fn run(config: &GendocConfig) -> Result<(), GendocError> {
    let mut stdout = io::stdout().lock();
    run_to(config, &StderrJsonlTelemetrySink, &mut stdout).map(drop)
}

/// Runs generation, writing the summary (or, in dry-run mode, the edits) to
/// `writer`.
///
/// # Errors
///
/// See [`run`].
pub fn run_to<W: Write>(
    config: &GendocConfig,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<ActionReport, GendocError> {
    let class_path = Utf8Path::new(config.require_class_file()?);
    let category = config.accessor_category()?;
    let store = open_template_store(config.database_url.as_deref())?;
    let [getter, setter] = DocTemplateConfig::load_all(&store);

    let mut document = ClassDocument::read(class_path)?;
    let renderer = TemplateRenderer::new();
    let synthesizer = CommentSynthesizer::new(&renderer, config.resolved_project_name());
    let mut selector = selector_for(config);

    let report = DocGenAction::new(category).run(
        &mut document,
        selector.as_mut(),
        &synthesizer,
        CategoryTemplates::new(&getter, &setter),
    );
    if let Some(event) = report.telemetry_event() {
        telemetry.record(event);
    }

    if config.dry_run {
        write_edits_jsonl(writer, &report.outcome.edits)?;
        return Ok(report);
    }

    if report.applied_count() > 0 {
        document.write(Utf8Path::new(config.output_path()?))?;
    }
    write_report_summary(writer, &report)?;
    Ok(report)
}

fn selector_for(config: &GendocConfig) -> Box<dyn MethodSelector> {
    match config.method_names() {
        Some(names) => Box::new(SelectNamed::new(names, config.overwrite)),
        None => Box::new(SelectAll::new(config.overwrite)),
    }
}

#[cfg(test)]
mod tests {
    use camino::{Utf8Path, Utf8PathBuf};
    use gendoc::action::ActionStatus;
    use gendoc::telemetry::TelemetryEvent;
    use gendoc::telemetry::test_support::RecordingTelemetrySink;
    use gendoc::{ClassDescriptor, ClassDocument, GendocConfig, MethodDescriptor};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::run_to;

    #[fixture]
    fn class_file() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("Foo.json"))
            .expect("temp path should be UTF-8");
        let class = ClassDescriptor::new("Foo", "com.example.Foo")
            .with_method(MethodDescriptor::new("getBar").returning("int"))
            .with_method(MethodDescriptor::new("setBar").with_parameter("bar", "int"));
        ClassDocument::new(class)
            .write(&path)
            .expect("class file should be written");
        (temp_dir, path)
    }

    fn comments(path: &Utf8Path) -> Vec<Option<String>> {
        ClassDocument::read(path)
            .expect("class file should be readable")
            .into_class()
            .methods
            .into_iter()
            .map(|method| method.doc_comment)
            .collect()
    }

    #[rstest]
    fn generate_writes_comments_back(class_file: (TempDir, Utf8PathBuf)) {
        let (_temp_dir, path) = class_file;
        let config = GendocConfig {
            class_file: Some(path.to_string()),
            project_name: Some("demo".to_owned()),
            ..Default::default()
        };
        let telemetry = RecordingTelemetrySink::default();
        let mut output = Vec::new();

        let report = run_to(&config, &telemetry, &mut output).expect("generation should succeed");

        assert_eq!(report.status, ActionStatus::Completed);
        assert_eq!(
            comments(&path),
            vec![
                Some("/**\n * Getter for field bar.\n *\n * @return the value of the field.\n */".to_owned()),
                Some("/**\n * Setter for field bar.\n *\n * @param bar the value to set for the field.\n */".to_owned()),
            ]
        );
        assert_eq!(
            String::from_utf8(output).expect("valid UTF-8"),
            "Foo: 2 inserted, 0 replaced, 0 skipped, 0 failed\n"
        );
        assert!(matches!(
            telemetry.take().as_slice(),
            [TelemetryEvent::DocCommentsGenerated { inserted: 2, .. }]
        ));
    }

    #[rstest]
    fn dry_run_leaves_class_file_untouched(class_file: (TempDir, Utf8PathBuf)) {
        let (_temp_dir, path) = class_file;
        let config = GendocConfig {
            class_file: Some(path.to_string()),
            category: Some("getters".to_owned()),
            dry_run: true,
            ..Default::default()
        };
        let mut output = Vec::new();

        run_to(&config, &RecordingTelemetrySink::default(), &mut output).expect("dry run should succeed");

        assert_eq!(comments(&path), vec![None, None]);
        let jsonl = String::from_utf8(output).expect("valid UTF-8");
        assert_eq!(jsonl.lines().count(), 1);
        assert!(jsonl.contains(r#""method_name":"getBar""#));
    }

    #[rstest]
    fn named_methods_limit_selection(class_file: (TempDir, Utf8PathBuf)) {
        let (temp_dir, path) = class_file;
        let output_path = Utf8PathBuf::from_path_buf(temp_dir.path().join("out.json"))
            .expect("temp path should be UTF-8");
        let config = GendocConfig {
            class_file: Some(path.to_string()),
            output_file: Some(output_path.to_string()),
            methods: Some("setBar".to_owned()),
            ..Default::default()
        };

        run_to(&config, &RecordingTelemetrySink::default(), &mut Vec::new())
            .expect("generation should succeed");

        let written = comments(&output_path);
        assert_eq!(written.first(), Some(&None));
        assert!(written.get(1).is_some_and(Option::is_some));
        assert_eq!(comments(&path), vec![None, None]);
    }

    #[test]
    fn missing_class_file_is_reported() {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let config = GendocConfig {
            class_file: Some(temp_dir.path().join("Missing.json").to_string_lossy().into_owned()),
            ..Default::default()
        };

        let result = run_to(&config, &RecordingTelemetrySink::default(), &mut Vec::new());

        assert!(matches!(result, Err(gendoc::GendocError::Model(_))));
    }
}
