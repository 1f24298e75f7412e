//! `modelsmith init`: write a default configuration file and, optionally,
//! copy the built-in templates so they can be customised.

use std::path::{Path, PathBuf};

use tracing::debug;

use modelsmith_adapters::builtin_templates;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let config_path = if args.global {
        AppConfig::global_path().ok_or_else(|| {
            CliError::config("no user configuration directory on this platform")
        })?
    } else {
        PathBuf::from(LOCAL_CONFIG)
    };

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
    } else {
        let toml = AppConfig::default().to_toml().map_err(CliError::config)?;
        write_file(&config_path, &toml)?;
        output.success(&format!("Configuration created at {}", config_path.display()))?;
    }

    if args.templates {
        let dir = config.template_directory();
        for name in copy_templates(&dir, args.force)? {
            output.success(&format!("Template {name} copied"))?;
        }
        if config.templates.directory.is_none() {
            output.info(&format!(
                "Set templates.directory = \"{}\" to use them",
                dir.display()
            ))?;
        }
    }

    Ok(())
}

/// Copy each built-in template to `<dir>/<Name>.hbs`. Existing files are
/// kept unless `force`. Returns the names that were written.
fn copy_templates(dir: &Path, force: bool) -> CliResult<Vec<&'static str>> {
    let mut copied = Vec::new();
    for name in builtin_templates::names() {
        let path = dir.join(format!("{name}.{}", builtin_templates::EXTENSION));
        if path.exists() && !force {
            debug!(path = %path.display(), "Template exists, skipped");
            continue;
        }
        let source = builtin_templates::get(name).unwrap_or_default();
        write_file(&path, source)?;
        copied.push(name);
    }
    Ok(copied)
}

fn write_file(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_cli_context(|| format!("Failed to write '{}'", path.display()))
}
