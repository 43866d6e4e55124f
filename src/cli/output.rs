//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use gendoc::action::{ActionReport, ActionStatus};
use gendoc::doc_config::PLACEHOLDER_HELP;
use gendoc::{GendocError, GeneratedEdit, TemplateConfig};

/// Writes each edit as one JSON object per line.
pub fn write_edits_jsonl<W: Write>(
    writer: &mut W,
    edits: &[GeneratedEdit],
) -> Result<(), GendocError> {
    for edit in edits {
        let line = serde_json::to_string(edit).map_err(|error| GendocError::Io {
            message: format!("failed to serialise edit: {error}"),
        })?;
        writeln!(writer, "{line}").map_err(|e| io_error(&e))?;
    }
    Ok(())
}

/// Writes a one-paragraph summary of an action run.
pub fn write_report_summary<W: Write>(
    writer: &mut W,
    report: &ActionReport,
) -> Result<(), GendocError> {
    let class_name = report.class_name.as_deref().unwrap_or("(no class)");
    match report.status {
        ActionStatus::NoClass => {
            writeln!(writer, "No class to document.").map_err(|e| io_error(&e))?;
        }
        ActionStatus::NoCandidates => {
            writeln!(writer, "{class_name}: nothing to document.").map_err(|e| io_error(&e))?;
        }
        ActionStatus::Cancelled => {
            writeln!(writer, "{class_name}: cancelled.").map_err(|e| io_error(&e))?;
        }
        ActionStatus::Completed => {
            let outcome = &report.outcome;
            writeln!(
                writer,
                "{class_name}: {} inserted, {} replaced, {} skipped, {} failed",
                outcome.inserted_count(),
                outcome.replaced_count(),
                outcome.skipped.len(),
                outcome.failures.len() + report.apply_failures.len(),
            )
            .map_err(|e| io_error(&e))?;
            for failure in &outcome.failures {
                writeln!(writer, "  error: {}", failure.error).map_err(|e| io_error(&e))?;
            }
            for failure in &report.apply_failures {
                writeln!(writer, "  error: {}", failure.error).map_err(|e| io_error(&e))?;
            }
        }
    }
    Ok(())
}

/// Writes every template under its category name, followed by the
/// placeholder help.
pub fn write_templates<W: Write, C: TemplateConfig>(
    writer: &mut W,
    configs: &[C],
) -> Result<(), GendocError> {
    for config in configs {
        writeln!(writer, "== {} ==", config.config_name()).map_err(|e| io_error(&e))?;
        writeln!(writer, "{}", config.template()).map_err(|e| io_error(&e))?;
        writeln!(writer).map_err(|e| io_error(&e))?;
    }
    writeln!(writer, "{PLACEHOLDER_HELP}").map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`GendocError`].
pub(crate) fn io_error(error: &io::Error) -> GendocError {
    GendocError::Io {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use gendoc::action::{ActionReport, ActionStatus};
    use gendoc::doc_config::{DocTemplateConfig, TemplateCategory};
    use gendoc::generator::GenerationOutcome;
    use gendoc::{EditMode, GeneratedEdit, MethodId};

    use super::{write_edits_jsonl, write_report_summary, write_templates};

    fn edit(index: usize, name: &str, mode: EditMode) -> GeneratedEdit {
        GeneratedEdit {
            method: MethodId::new(index),
            method_name: name.to_owned(),
            comment: format!("/** {name} */"),
            mode,
        }
    }

    #[test]
    fn edits_are_written_one_per_line() {
        let mut buffer = Vec::new();

        write_edits_jsonl(
            &mut buffer,
            &[
                edit(0, "getBar", EditMode::InsertBefore),
                edit(1, "setBar", EditMode::ReplaceExisting),
            ],
        )
        .expect("write should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        insta::assert_snapshot!(output, @r#"
        {"method":0,"method_name":"getBar","comment":"/** getBar */","mode":"insert_before"}
        {"method":1,"method_name":"setBar","comment":"/** setBar */","mode":"replace_existing"}
        "#);
    }

    #[test]
    fn completed_summary_counts_modes() {
        let report = ActionReport {
            status: ActionStatus::Completed,
            class_name: Some("Foo".to_owned()),
            outcome: GenerationOutcome {
                edits: vec![
                    edit(0, "getBar", EditMode::InsertBefore),
                    edit(1, "setBar", EditMode::ReplaceExisting),
                ],
                skipped: vec![MethodId::new(3)],
                failures: Vec::new(),
            },
            apply_failures: Vec::new(),
        };
        let mut buffer = Vec::new();

        write_report_summary(&mut buffer, &report).expect("write should succeed");

        assert_eq!(
            String::from_utf8(buffer).expect("valid UTF-8"),
            "Foo: 1 inserted, 1 replaced, 1 skipped, 0 failed\n"
        );
    }

    #[test]
    fn templates_are_listed_with_help() {
        let configs = TemplateCategory::ALL.map(DocTemplateConfig::with_default);
        let mut buffer = Vec::new();

        write_templates(&mut buffer, &configs).expect("write should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.starts_with("== Getter ==\n/**\n * Getter for field $field."));
        assert!(output.contains("== Setter =="));
        assert!(output.contains("$project_name - the project name"));
        assert!(output.contains("Control flow uses Jinja2 tags only"));
        assert!(output.contains("Velocity directives such as #if, #set or ## comments are not interpreted"));
    }
}
