//! Implementation of the `modelsmith list` command: the entities a relation
//! can point to.

use serde::Serialize;

use modelsmith_adapters::DirectoryEntityLookup;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct EntityRow {
    name: String,
    qualified: String,
    external: bool,
    path: Option<String>,
}

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let lookup =
        DirectoryEntityLookup::scan(config.model_root(), config.entities.external.clone());
    let rows: Vec<EntityRow> = rows(&lookup, &config)
        .into_iter()
        .filter(|r| !(args.project && r.external) && !(args.external && !r.external))
        .collect();

    match args.format {
        ListFormat::Table => {
            output.header(&format!("Entities ({}):", config.models.directory.display()))?;
            if rows.is_empty() {
                output.print("  (none)")?;
            }
            for row in &rows {
                let origin = if row.external { "external" } else { "project" };
                output.print(&format!("  {:<24} {:<9} {}", row.name, origin, row.qualified))?;
            }
        }
        ListFormat::Json => {
            let value = serde_json::to_value(&rows).unwrap_or_default();
            output.json(&value)?;
        }
        ListFormat::List => {
            for row in &rows {
                output.print(&row.qualified)?;
            }
        }
        ListFormat::Csv => {
            output.print("name,qualified,external,path")?;
            for row in &rows {
                output.print(&format!(
                    "{},{},{},{}",
                    row.name,
                    row.qualified,
                    row.external,
                    row.path.as_deref().unwrap_or_default()
                ))?;
            }
        }
    }

    Ok(())
}

fn rows(lookup: &DirectoryEntityLookup, config: &AppConfig) -> Vec<EntityRow> {
    let root = config.model_root();
    let project = lookup.project_entities().map(|name| EntityRow {
        name: name.to_string(),
        qualified: format!("{}::{name}", root.namespace),
        external: false,
        path: Some(root.path_for(name).display().to_string()),
    });
    let external = lookup.external_entities().iter().map(|qualified| EntityRow {
        name: qualified.rsplit("::").next().unwrap_or(qualified).to_string(),
        qualified: qualified.clone(),
        external: true,
        path: None,
    });
    project.chain(external).collect()
}
