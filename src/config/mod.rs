//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.gendoc.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `GENDOC_CLASS_FILE`, `GENDOC_DATABASE_URL`,
//!    and so on
//! 4. **Command-line arguments** – `--class-file`/`-c`, `--category`/`-k`, ...
//!
//! # Configuration File
//!
//! Place `.gendoc.toml` in the current directory, home directory, or
//! XDG config directory with:
//!
//! ```toml
//! class_file = "model/Foo.json"
//! project_name = "demo"
//! category = "accessors"
//! overwrite = false
//! database_url = "gendoc.sqlite"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::accessor::AccessorCategory;
use crate::error::GendocError;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Run database migrations and exit.
    MigrateDatabase,
    /// Validate and store templates read from files.
    SaveTemplates,
    /// Generate comments for a class model.
    Generate,
    /// Print the current templates and the placeholder help.
    ShowTemplates,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `GENDOC_CLASS_FILE` or `--class-file`: Class model to document
/// - `GENDOC_PROJECT_NAME` or `--project-name`: Value of `$project_name`
/// - `GENDOC_CATEGORY` or `--category`: `getters`, `setters`, or `accessors`
/// - `GENDOC_DATABASE_URL` or `--database-url`: Local `SQLite` database path
///
/// # Example
///
/// ```no_run
/// use gendoc::GendocConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = GendocConfig::load().expect("failed to load configuration");
/// let category = config.accessor_category().expect("valid category");
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GENDOC",
    discovery(
        dotfile_name = ".gendoc.toml",
        config_file_name = "gendoc.toml",
        app_name = "gendoc"
    )
)]
pub struct GendocConfig {
    /// JSON class model to document.
    ///
    /// Can be provided via:
    /// - CLI: `--class-file <PATH>` or `-c <PATH>`
    /// - Environment: `GENDOC_CLASS_FILE`
    /// - Config file: `class_file = "..."`
    #[ortho_config(cli_short = 'c')]
    pub class_file: Option<String>,

    /// Where to write the documented class model.
    ///
    /// Defaults to rewriting `class_file` in place.
    #[ortho_config(cli_short = 'o')]
    pub output_file: Option<String>,

    /// Project name exposed to templates as `$project_name`.
    ///
    /// Defaults to the name of the current directory.
    #[ortho_config(cli_short = 'p')]
    pub project_name: Option<String>,

    /// Accessor category to document: `getters`, `setters`, or `accessors`.
    ///
    /// Defaults to `accessors` (getters and setters).
    #[ortho_config(cli_short = 'k')]
    pub category: Option<String>,

    /// Replaces existing documentation comments.
    ///
    /// Can be provided via:
    /// - CLI: `--overwrite` / `-w`
    /// - Config file: `overwrite = true`
    #[ortho_config(cli_short = 'w')]
    pub overwrite: bool,

    /// Comma-separated method names to document; all candidates when unset.
    #[ortho_config(cli_short = 'm')]
    pub methods: Option<String>,

    /// Local `SQLite` database URL/path holding saved templates.
    ///
    /// When unset, the built-in default templates are used.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>`
    /// - Environment: `GENDOC_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--migrate-db`
    /// - Config file: `migrate_db = true`
    #[ortho_config()]
    pub migrate_db: bool,

    /// File holding a getter template to validate and save.
    #[ortho_config()]
    pub getter_template_file: Option<String>,

    /// File holding a setter template to validate and save.
    #[ortho_config()]
    pub setter_template_file: Option<String>,

    /// Prints the generated edits as JSON lines instead of writing the class
    /// model.
    #[ortho_config(cli_short = 'n')]
    pub dry_run: bool,
}

impl GendocConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// Migration wins over saving templates, which wins over generation.
    /// With nothing to do, the current templates are shown.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.getter_template_file.is_some() || self.setter_template_file.is_some() {
            OperationMode::SaveTemplates
        } else if self.class_file.is_some() {
            OperationMode::Generate
        } else {
            OperationMode::ShowTemplates
        }
    }

    /// Returns the class model path or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`GendocError::Configuration`] when no class file is
    /// configured.
    pub fn require_class_file(&self) -> Result<&str, GendocError> {
        self.class_file
            .as_deref()
            .ok_or_else(|| GendocError::Configuration {
                message: "class model file is required (use --class-file or -c)".to_owned(),
            })
    }

    /// Returns where the documented class model is written.
    ///
    /// # Errors
    ///
    /// Returns [`GendocError::Configuration`] when no class file is
    /// configured.
    pub fn output_path(&self) -> Result<&str, GendocError> {
        self.output_file
            .as_deref()
            .map_or_else(|| self.require_class_file(), Ok)
    }

    /// Parses the requested accessor category.
    ///
    /// # Errors
    ///
    /// Returns [`GendocError::Configuration`] for an unknown category name.
    pub fn accessor_category(&self) -> Result<AccessorCategory, GendocError> {
        self.category
            .as_deref()
            .map_or(Ok(AccessorCategory::default()), str::parse)
            .map_err(|error| GendocError::Configuration {
                message: error.to_string(),
            })
    }

    /// Returns the requested method names, or `None` for every candidate.
    #[must_use]
    pub fn method_names(&self) -> Option<Vec<String>> {
        let names: Vec<String> = self
            .methods
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        Some(names)
    }

    /// Returns the project name, defaulting to the current directory name.
    #[must_use]
    pub fn resolved_project_name(&self) -> String {
        if let Some(name) = self.project_name.as_deref() {
            return name.to_owned();
        }
        env::current_dir()
            .ok()
            .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
            .unwrap_or_default()
    }
}
