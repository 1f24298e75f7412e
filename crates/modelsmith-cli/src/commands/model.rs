//! Implementation of the `modelsmith model` command.
//!
//! Responsibility: wire the adapters from configuration, run one session
//! through `ModelService`, then either preview (`--dry-run`) or commit. No
//! modelling logic lives here.

use std::path::PathBuf;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, instrument};

use modelsmith_adapters::{
    DirectoryEntityLookup, HandlebarsRenderer, LayeredTemplateStore, LocalFilesystem,
    ScriptedPrompter,
};
use modelsmith_core::{
    application::{
        GenerationOptions, GenerationTransaction, ModelService, PlannedModel, ports::Prompter,
    },
    domain::Property,
};

use crate::{
    cli::{GlobalArgs, ModelArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Timestamp prefix of migration file names.
pub const MIGRATION_STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Execute the `modelsmith model` command.
///
/// Dispatch sequence:
/// 1. Build the adapters and the service from configuration
/// 2. Run the session (name, fields, relations) and plan every file
/// 3. `--dry-run`: print the rendered files and discard the plan
/// 4. Otherwise confirm and commit
#[instrument(skip_all, fields(model = ?args.name))]
pub fn execute(
    args: ModelArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let prompter = build_prompter(&args, &output)?;
    let mut service = build_service(prompter, &config);
    let options = generation_options(&args);

    debug!(
        migration = options.migration.is_some(),
        seeder = options.seeder,
        dry_run = args.dry_run,
        "Session starting"
    );

    let planned = match service.run_session(args.name.as_deref(), &options) {
        Ok(planned) => planned,
        Err(e) => {
            service.discard();
            return Err(e.into());
        }
    };
    info!(
        model = %planned.descriptor,
        properties = planned.schema.len(),
        failures = service.failures().len(),
        "Session complete"
    );

    if args.dry_run {
        let previews = service.preview_all()?;
        service.discard();
        return show_preview(&planned, previews, &output);
    }

    if !global.quiet && !output.is_json() {
        show_summary(&planned, &output)?;
    }
    let question = format!("Write {} file(s)?", planned.paths.len());
    if !args.yes && !service.prompter().confirm(&question, true)? {
        service.discard();
        return Err(CliError::Cancelled);
    }

    let written = service.commit()?;
    info!(files = written.len(), "Model written");

    if output.is_json() {
        output.json(&json!({
            "model": planned.descriptor.qualified_name(),
            "written": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    for path in &written {
        output.success(&format!("Created {}", path.display()))?;
    }
    if !global.quiet {
        output.print("")?;
        output.print("Next: review the generated files and add the inverse sides listed in the model header.")?;
    }
    Ok(())
}

// ── Wiring ────────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn interactive_prompter(output: &OutputManager) -> CliResult<Box<dyn Prompter>> {
    Ok(Box::new(crate::prompt::DialoguerPrompter::new(
        output.supports_color(),
    )))
}

#[cfg(not(feature = "interactive"))]
fn interactive_prompter(_output: &OutputManager) -> CliResult<Box<dyn Prompter>> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

fn build_prompter(args: &ModelArgs, output: &OutputManager) -> CliResult<Box<dyn Prompter>> {
    if args.yes {
        // Without a name there is nothing to accept; clap enforces `requires`.
        if args.name.is_none() {
            return Err(CliError::InvalidInput {
                message: "--yes needs a model NAME".into(),
            });
        }
        return Ok(Box::new(ScriptedPrompter::accept_defaults()));
    }
    interactive_prompter(output)
}

pub fn build_service(prompter: Box<dyn Prompter>, config: &AppConfig) -> ModelService {
    let settings = config.model_settings();
    let store = match &config.templates.directory {
        Some(dir) => LayeredTemplateStore::with_directory(dir),
        None => LayeredTemplateStore::new(),
    };
    let entities =
        DirectoryEntityLookup::scan(settings.root.clone(), config.entities.external.clone());
    let transaction = GenerationTransaction::new(
        Box::new(store),
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    ModelService::new(prompter, Box::new(entities), transaction, settings)
}

fn generation_options(args: &ModelArgs) -> GenerationOptions {
    GenerationOptions {
        migration: (args.migration || args.all)
            .then(|| Utc::now().format(MIGRATION_STAMP_FORMAT).to_string()),
        seeder: args.seed || args.all,
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

fn property_line(property: &Property) -> String {
    match property {
        Property::Field(f) => format!("  {:<20} {}", f.name(), f.rust_type()),
        Property::Relation(r) => format!(
            "  {:<20} {} {}",
            r.local_property(),
            r.kind(),
            r.remote_class()
        ),
    }
}

fn show_summary(planned: &PlannedModel, out: &OutputManager) -> CliResult<()> {
    out.header(&planned.descriptor.qualified_name())?;
    if planned.schema.is_empty() {
        out.print("  (no properties)")?;
    }
    for property in planned.schema.properties() {
        out.print(&property_line(property))?;
    }
    out.print("")?;
    for path in &planned.paths {
        out.info(&format!("will create {}", path.display()))?;
    }
    Ok(())
}

fn show_preview(
    planned: &PlannedModel,
    previews: Vec<(PathBuf, String)>,
    out: &OutputManager,
) -> CliResult<()> {
    if out.is_json() {
        let files: Vec<_> = previews
            .iter()
            .map(|(path, contents)| json!({ "path": path.display().to_string(), "contents": contents }))
            .collect();
        out.json(&json!({
            "model": planned.descriptor.qualified_name(),
            "dryRun": true,
            "files": files,
        }))?;
        return Ok(());
    }

    out.info(&format!(
        "Dry run: {} file(s) for {}, nothing written",
        previews.len(),
        planned.descriptor.qualified_name()
    ))?;
    for (path, contents) in &previews {
        out.print("")?;
        out.header(&format!("── {} ──", path.display()))?;
        out.dimmed(contents.trim_end())?;
    }
    Ok(())
}
