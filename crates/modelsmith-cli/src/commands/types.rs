//! `modelsmith types`: the field types the type prompt accepts.

use serde_json::{Value, json};

use modelsmith_core::{
    application::services::{LIST_TYPES, type_listing},
    domain::{FieldType, grouped_types},
};

use crate::{
    cli::{ListFormat, TypesArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: TypesArgs, output: OutputManager) -> CliResult<()> {
    match args.format {
        ListFormat::Json => output.json(&types_json())?,
        ListFormat::Table => {
            for line in type_listing() {
                if line.starts_with(' ') {
                    output.print(&line)?;
                } else {
                    output.header(&line)?;
                }
            }
            output.print("")?;
            output.print(&format!(
                "Enter {LIST_TYPES} at the type prompt to see this list during a session."
            ))?;
        }
        ListFormat::List => {
            for ty in FieldType::all() {
                output.print(ty.as_str())?;
            }
        }
        ListFormat::Csv => {
            output.print("type,category")?;
            for group in grouped_types() {
                for entry in &group.entries {
                    for ty in std::iter::once(&entry.primary).chain(entry.variants) {
                        output.print(&format!("{},{}", ty.as_str(), group.category.title()))?;
                    }
                }
            }
        }
    }
    Ok(())
}

fn types_json() -> Value {
    let groups: Vec<Value> = grouped_types()
        .into_iter()
        .map(|group| {
            let types: Vec<Value> = group
                .entries
                .iter()
                .map(|entry| {
                    json!({
                        "type": entry.primary.as_str(),
                        "variants": entry.variants.iter().map(FieldType::as_str).collect::<Vec<_>>(),
                    })
                })
                .collect();
            json!({ "category": group.category.title(), "types": types })
        })
        .collect();
    Value::Array(groups)
}
