//! `modelsmith config`: inspect configuration values.

use serde_json::json;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)
                .ok_or(CliError::UnknownConfigKey { key: key.clone() })?;
            if output.is_json() {
                output.json(&json!({ key: value }))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                let value = serde_json::to_value(&config).map_err(CliError::config)?;
                output.json(&value)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&config.to_toml().map_err(CliError::config)?)?;
            }
        }

        ConfigCommands::Path => {
            let paths = match global.config {
                Some(path) => vec![path],
                None => AppConfig::search_paths(),
            };
            for path in paths.iter().rev() {
                let marker = if path.exists() { "" } else { "  (not found)" };
                output.print(&format!("{}{marker}", path.display()))?;
            }
        }
    }

    Ok(())
}
