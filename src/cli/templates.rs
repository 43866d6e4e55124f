//! Showing and saving the category templates.

use std::io::{self, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use gendoc::doc_config::{DocTemplateConfig, TemplateCategory};
use gendoc::persistence::PersistenceError;
use gendoc::telemetry::{StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
use gendoc::{GendocConfig, GendocError, TemplateEditor, TemplateRenderer};

use super::open_template_store;
use super::output::write_templates;

/// Prints the current templates.
///
/// # Errors
///
/// Returns [`GendocError`] when the store cannot be opened or stdout fails.
pub fn show(config: &GendocConfig) -> Result<(), GendocError> {
    let store = open_template_store(config.database_url.as_deref())?;
    let configs = DocTemplateConfig::load_all(&store);
    let mut stdout = io::stdout().lock();
    write_templates(&mut stdout, &configs)
}

/// Validates the configured template files and saves them.
///
/// # Errors
///
/// Returns [`GendocError::Configuration`] without a database URL,
/// [`GendocError::InvalidTemplate`] when any template is invalid (nothing is
/// saved), and [`GendocError::Persistence`] when a save fails.
pub fn save(config: &GendocConfig) -> Result<(), GendocError> {
    save_with(config, &StderrJsonlTelemetrySink)
}

/// Like [`save`], recording one event per saved category in `telemetry`.
///
/// # Errors
///
/// See [`save`].
pub fn save_with(config: &GendocConfig, telemetry: &dyn TelemetrySink) -> Result<(), GendocError> {
    let database_url =
        config
            .database_url
            .as_deref()
            .ok_or_else(|| GendocError::Configuration {
                message: PersistenceError::MissingDatabaseUrl.to_string(),
            })?;
    let store = open_template_store(Some(database_url))?;
    let mut editor = TemplateEditor::new(DocTemplateConfig::load_all(&store));

    let files = [
        (TemplateCategory::Getter, config.getter_template_file.as_deref()),
        (TemplateCategory::Setter, config.setter_template_file.as_deref()),
    ];
    let mut changed = Vec::new();
    for (category, file) in files {
        let Some(path) = file else {
            continue;
        };
        let template = read_template_file(Utf8Path::new(path))?;
        editor.set_draft(category, template.trim_end());
        changed.push(category);
    }

    editor.apply(&TemplateRenderer::new())?;
    for category in changed {
        tracing::debug!("saved {category} template");
        telemetry.record(TelemetryEvent::TemplateSaved {
            category: category.config_name().to_owned(),
        });
    }
    Ok(())
}

fn read_template_file(path: &Utf8Path) -> Result<String, GendocError> {
    let io_failure = |error: io::Error| GendocError::Io {
        message: format!("failed to read template {path}: {error}"),
    };
    let file_name = path.file_name().ok_or_else(|| GendocError::Configuration {
        message: format!("template path {path} has no file name"),
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_failure)?;
    dir.read_to_string(file_name).map_err(io_failure)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use camino::Utf8PathBuf;
    use gendoc::doc_config::{DEFAULT_SETTER_TEMPLATE, TemplateStore};
    use gendoc::persistence::{SqliteTemplateStore, migrate_database};
    use gendoc::telemetry::test_support::RecordingTelemetrySink;
    use gendoc::telemetry::{NoopTelemetrySink, TelemetryEvent};
    use gendoc::{DocTemplateConfig, GendocConfig, GendocError, TemplateCategory, TemplateConfig};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::save_with;

    #[fixture]
    fn workspace() -> (TempDir, String) {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let database_url = temp_dir
            .path()
            .join("gendoc.sqlite")
            .to_string_lossy()
            .into_owned();
        migrate_database(&database_url, &NoopTelemetrySink).expect("migration should succeed");
        (temp_dir, database_url)
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("UTF-8 path");
        std::fs::write(&path, content).expect("file should be written");
        path.into_string()
    }

    fn stored(database_url: &str, category: TemplateCategory) -> String {
        let store: Arc<dyn TemplateStore> =
            Arc::new(SqliteTemplateStore::new(database_url).expect("store should build"));
        DocTemplateConfig::load(category, store).template().to_owned()
    }

    #[rstest]
    fn saves_valid_template(workspace: (TempDir, String)) {
        let (temp_dir, database_url) = workspace;
        let getter = write_file(&temp_dir, "getter.vm", "/**\n * Reads $field.\n */\n");
        let config = GendocConfig {
            database_url: Some(database_url.clone()),
            getter_template_file: Some(getter),
            ..Default::default()
        };
        let telemetry = RecordingTelemetrySink::default();

        save_with(&config, &telemetry).expect("save should succeed");

        assert_eq!(
            stored(&database_url, TemplateCategory::Getter),
            "/**\n * Reads $field.\n */"
        );
        assert_eq!(
            telemetry.take(),
            vec![TelemetryEvent::TemplateSaved {
                category: "Getter".to_owned(),
            }]
        );
    }

    #[rstest]
    fn invalid_template_blocks_every_save(workspace: (TempDir, String)) {
        let (temp_dir, database_url) = workspace;
        let getter = write_file(&temp_dir, "getter.vm", "/** Reads $field. */");
        let setter = write_file(&temp_dir, "setter.vm", "Sets $field");
        let config = GendocConfig {
            database_url: Some(database_url.clone()),
            getter_template_file: Some(getter),
            setter_template_file: Some(setter),
            ..Default::default()
        };

        let result = save_with(&config, &NoopTelemetrySink);

        assert!(
            matches!(&result, Err(GendocError::InvalidTemplate { message }) if message.starts_with("Template for Setter is invalid!")),
            "unexpected result: {result:?}"
        );
        assert_eq!(
            stored(&database_url, TemplateCategory::Setter),
            DEFAULT_SETTER_TEMPLATE
        );
        assert_ne!(
            stored(&database_url, TemplateCategory::Getter),
            "/** Reads $field. */"
        );
    }

    #[test]
    fn save_requires_database_url() {
        let config = GendocConfig {
            getter_template_file: Some("getter.vm".to_owned()),
            ..Default::default()
        };

        let result = save_with(&config, &NoopTelemetrySink);

        assert!(matches!(result, Err(GendocError::Configuration { .. })));
    }
}
