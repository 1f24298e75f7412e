//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only sees the [`ModelSettings`] and
//! adapter parameters built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `MODELSMITH__<SECTION>__<KEY>`
//! 3. `--config <FILE>` if given; otherwise `./modelsmith.toml`, then the
//!    global file in the user config directory (both optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::ValueEnum as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::OutputFormat;

use modelsmith_core::{
    application::ModelSettings,
    domain::{FieldDefaults, ModelRoot},
};

/// File name of the project configuration, relative to the working directory.
pub const LOCAL_CONFIG: &str = "modelsmith.toml";

const ENV_PREFIX: &str = "MODELSMITH";

/// Application configuration. Sections missing after the merge (empty
/// tables are dropped by `config`) fall back to [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub models: ModelsConfig,
    pub templates: TemplateConfig,
    pub fields: FieldsConfig,
    pub entities: EntitiesConfig,
    pub artifacts: ArtifactsConfig,
    pub output: OutputConfig,
}

/// Where generated models go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub directory: PathBuf,
    pub namespace: String,
    pub extension: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Overrides for the built-in templates, looked up by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Defaults offered for new fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldsConfig {
    pub string_length: u32,
    pub decimal_precision: u32,
    pub decimal_scale: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitiesConfig {
    /// Qualified names of entities owned outside the project.
    #[serde(default)]
    pub external: Vec<String>,
}

/// Where auxiliary artifacts go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    pub migrations: PathBuf,
    pub seeders: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = ModelSettings::default();
        Self {
            models: ModelsConfig {
                directory: settings.root.directory,
                namespace: settings.root.namespace,
                extension: settings.root.extension,
            },
            templates: TemplateConfig::default(),
            fields: FieldsConfig {
                string_length: settings.defaults.string_length,
                decimal_precision: settings.defaults.decimal_precision,
                decimal_scale: settings.defaults.decimal_scale,
            },
            entities: EntitiesConfig::default(),
            artifacts: ArtifactsConfig {
                migrations: settings.migrations_dir,
                seeders: settings.seeders_dir,
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, files and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit files are optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to load built-in defaults")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(global) = Self::global_path() {
                    builder = builder.add_source(File::from(global).required(false));
                }
                builder = builder.add_source(File::from(Path::new(LOCAL_CONFIG)).required(false));
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("entities.external"),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the generators cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.field_defaults()
            .validate()
            .context("Invalid [fields] defaults")?;
        if self.models.extension.is_empty() || self.models.extension.starts_with('.') {
            anyhow::bail!(
                "models.extension must be non-empty and without a leading dot, got '{}'",
                self.models.extension
            );
        }
        if OutputFormat::from_str(&self.output.format, true).is_err() {
            anyhow::bail!(
                "output.format must be one of auto, human, plain, json, got '{}'",
                self.output.format
            );
        }
        Ok(())
    }

    /// Path to the global configuration file, if the platform has a config
    /// directory.
    pub fn global_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "modelsmith", "modelsmith")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Files read when no `--config` is given, lowest priority first.
    pub fn search_paths() -> Vec<PathBuf> {
        Self::global_path()
            .into_iter()
            .chain(std::iter::once(PathBuf::from(LOCAL_CONFIG)))
            .collect()
    }

    pub fn model_root(&self) -> ModelRoot {
        ModelRoot::new(
            &self.models.directory,
            &self.models.namespace,
            &self.models.extension,
        )
    }

    pub fn field_defaults(&self) -> FieldDefaults {
        FieldDefaults {
            string_length: self.fields.string_length,
            decimal_precision: self.fields.decimal_precision,
            decimal_scale: self.fields.decimal_scale,
        }
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            root: self.model_root(),
            defaults: self.field_defaults(),
            migrations_dir: self.artifacts.migrations.clone(),
            seeders_dir: self.artifacts.seeders.clone(),
        }
    }

    /// Directory `init --templates` copies built-ins to.
    pub fn template_directory(&self) -> PathBuf {
        self.templates
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("templates"))
    }

    /// Value at a dotted key such as `models.directory`. Lists and tables
    /// are returned as JSON.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&tree, |node, part| node.get(part))?;
        Some(match value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_core_settings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.model_settings(), ModelSettings::default());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[models]\ndirectory = \"app/entities\"\nnamespace = \"app::entities\"\n\
             [fields]\nstring_length = 80\n\
             [entities]\nexternal = [\"auth::User\"]\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.models.directory, PathBuf::from("app/entities"));
        assert_eq!(cfg.models.extension, "rs");
        assert_eq!(cfg.fields.string_length, 80);
        assert_eq!(cfg.fields.decimal_precision, 10);
        assert_eq!(cfg.entities.external, vec!["auth::User"]);
    }

    #[test]
    fn empty_sections_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.templates, TemplateConfig::default());
        assert_eq!(cfg.models, AppConfig::default().models);
    }

    #[test]
    fn default_toml_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("modelsmith.toml");
        std::fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.templates.directory, None);
        assert!(cfg.entities.external.is_empty());
        assert_eq!(cfg.template_directory(), PathBuf::from("templates"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/no/such/modelsmith.toml"))).is_err());
    }

    #[test]
    fn invalid_defaults_are_rejected() {
        let mut cfg = AppConfig::default();
        cfg.fields.decimal_scale = 20;
        cfg.fields.decimal_precision = 5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn dotted_get() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("models.namespace").as_deref(), Some("crate::models"));
        assert_eq!(cfg.get("fields.string_length").as_deref(), Some("255"));
        assert_eq!(cfg.get("entities.external").as_deref(), Some("[]"));
        assert!(cfg.get("models.nope").is_none());
    }

    #[test]
    fn toml_round_trips_through_the_loader() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("modelsmith.toml");
        std::fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();
        assert_eq!(AppConfig::load(Some(&path)).unwrap(), AppConfig::default());
    }
}
