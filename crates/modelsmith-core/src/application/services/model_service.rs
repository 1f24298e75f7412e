//! Model Service - main application orchestrator.
//!
//! This service coordinates one `model` session:
//! 1. Choose a model name (asked again while reserved or already on disk)
//! 2. Collect fields and relations with the `SchemaBuilder`
//! 3. Build template variables and plan the model file plus optional
//!    migration and seeder into the `GenerationTransaction`
//! 4. Commit (or preview, for dry runs)

use std::path::PathBuf;

use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{EntityLookup, Prompter},
        services::{generation_transaction::GenerationTransaction, schema_builder::SchemaBuilder},
    },
    domain::{
        DomainError, DomainValidator, EntitySchema, FieldDefaults, FieldSpec, ModelRoot,
        RelationKind, RelationSpec, RenderContext, TargetDescriptor, naming,
    },
    error::SmithResult,
};

/// Built-in template names planned by the service.
pub mod templates {
    pub const MODEL: &str = "Model";
    pub const MIGRATION: &str = "Migration";
    pub const SEEDER: &str = "Seeder";
}

/// Where generated artifacts go and which defaults new fields get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    pub root: ModelRoot,
    pub defaults: FieldDefaults,
    pub migrations_dir: PathBuf,
    pub seeders_dir: PathBuf,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            root: ModelRoot::default(),
            defaults: FieldDefaults::default(),
            migrations_dir: PathBuf::from("migrations"),
            seeders_dir: PathBuf::from("src/seeders"),
        }
    }
}

/// Auxiliary artifacts to plan next to the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Plan a migration using this timestamp prefix.
    pub migration: Option<String>,
    /// Plan a seeder.
    pub seeder: bool,
}

/// Result of a session that reached the planning stage.
#[derive(Debug, Clone)]
pub struct PlannedModel {
    pub descriptor: TargetDescriptor,
    pub schema: EntitySchema,
    pub paths: Vec<PathBuf>,
}

pub struct ModelService {
    prompter: Box<dyn Prompter>,
    entities: Box<dyn EntityLookup>,
    transaction: GenerationTransaction,
    settings: ModelSettings,
    failures: Vec<DomainError>,
}

impl ModelService {
    /// Create a new model service with the given adapters.
    pub fn new(
        prompter: Box<dyn Prompter>,
        entities: Box<dyn EntityLookup>,
        transaction: GenerationTransaction,
        settings: ModelSettings,
    ) -> Self {
        Self {
            prompter,
            entities,
            transaction,
            settings,
            failures: Vec::new(),
        }
    }

    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Every validation failure reported during this session.
    pub fn failures(&self) -> &[DomainError] {
        &self.failures
    }

    pub fn transaction(&self) -> &GenerationTransaction {
        &self.transaction
    }

    /// The session's prompter, for follow-up questions such as a final
    /// confirmation.
    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    /// Choose a name, collect the schema and plan every requested file.
    #[instrument(skip_all, fields(initial = ?initial))]
    pub fn run_session(
        &mut self,
        initial: Option<&str>,
        options: &GenerationOptions,
    ) -> SmithResult<PlannedModel> {
        let descriptor = self.choose_name(initial)?;
        self.prompter.say(&format!(
            "Creating {}. Now let's add some fields!",
            descriptor.qualified_name()
        ));
        self.prompter
            .say("You can always add more fields later manually or by re-running this command.");

        let schema = self.build_schema(&descriptor)?;
        let paths = self.plan(&descriptor, &schema, options)?;
        Ok(PlannedModel {
            descriptor,
            schema,
            paths,
        })
    }

    /// Ask for a model name until it is valid and not already on disk.
    ///
    /// `initial` (e.g. from the command line) is tried first.
    pub fn choose_name(&mut self, initial: Option<&str>) -> SmithResult<TargetDescriptor> {
        let mut candidate = initial.map(str::to_string);
        loop {
            let name = match candidate.take() {
                Some(name) => name,
                None => self.prompter.ask_with_completion(
                    "Class name of the model to create (e.g. User)",
                    &self.entities.known_entities(),
                    None,
                )?,
            };

            match self.check_name(&name) {
                Ok(descriptor) => {
                    debug!(model = %descriptor, "Model name chosen");
                    return Ok(descriptor);
                }
                Err(e) => {
                    self.prompter.say(&format!("[ERROR] {e}"));
                    self.failures.push(e);
                }
            }
        }
    }

    /// Run the interactive field loop for `descriptor`.
    pub fn build_schema(&mut self, descriptor: &TargetDescriptor) -> SmithResult<EntitySchema> {
        let mut builder = SchemaBuilder::new(
            descriptor.clone(),
            self.prompter.as_ref(),
            self.entities.as_ref(),
            self.settings.defaults,
        );
        let result = builder.run();
        self.failures.extend_from_slice(builder.failures());
        result
    }

    /// Template variables for the model, migration and seeder templates.
    pub fn model_variables(
        &self,
        descriptor: &TargetDescriptor,
        schema: &EntitySchema,
    ) -> RenderContext {
        let table = descriptor.table_name();
        let fields: Vec<Value> = schema.fields().map(field_variables).collect();
        let relations: Vec<Value> = schema.relations().map(relation_variables).collect();
        let join_tables: Vec<Value> = schema
            .relations()
            .filter(|r| r.kind() == RelationKind::ManyToMany)
            .map(|r| join_table(&table, r))
            .collect();
        let inverse_notes: Vec<Value> = schema
            .relations()
            .filter_map(|r| inverse_note(descriptor, r))
            .map(Value::from)
            .collect();

        RenderContext::new()
            .with("className", descriptor.name())
            .with("namespace", descriptor.namespace())
            .with("tableName", table)
            .with("fields", fields)
            .with("relations", relations)
            .with("joinTables", join_tables)
            .with("inverseNotes", inverse_notes)
    }

    /// Plan the model and any requested auxiliary files. Returns the planned
    /// paths in order.
    #[instrument(skip_all, fields(model = %descriptor.name()))]
    pub fn plan(
        &mut self,
        descriptor: &TargetDescriptor,
        schema: &EntitySchema,
        options: &GenerationOptions,
    ) -> SmithResult<Vec<PathBuf>> {
        let variables = self.model_variables(descriptor, schema);
        let mut paths = vec![self.transaction.plan_for(
            descriptor,
            templates::MODEL,
            variables.clone(),
        )?];

        if let Some(stamp) = &options.migration {
            let path = self.migration_path(descriptor, stamp);
            paths.push(
                self.transaction
                    .plan(path, templates::MIGRATION, variables.clone())?,
            );
        }

        if options.seeder {
            let path = self.seeder_path(descriptor);
            let seeder_vars = variables.with("seederName", format!("{}Seeder", descriptor.name()));
            paths.push(self.transaction.plan(path, templates::SEEDER, seeder_vars)?);
        }

        info!(files = paths.len(), "Model planned");
        Ok(paths)
    }

    /// Write every planned file.
    pub fn commit(&mut self) -> SmithResult<Vec<PathBuf>> {
        self.transaction.commit()
    }

    /// Render every planned file without writing.
    pub fn preview_all(&self) -> SmithResult<Vec<(PathBuf, String)>> {
        self.transaction
            .pending_paths()
            .into_iter()
            .map(|p| -> SmithResult<(PathBuf, String)> {
                Ok((p.to_path_buf(), self.transaction.preview(p)?))
            })
            .collect()
    }

    pub fn discard(&mut self) {
        self.transaction.discard();
    }

    pub fn migration_path(&self, descriptor: &TargetDescriptor, stamp: &str) -> PathBuf {
        self.settings
            .migrations_dir
            .join(format!("{stamp}_create_{}_table.sql", descriptor.table_name()))
    }

    pub fn seeder_path(&self, descriptor: &TargetDescriptor) -> PathBuf {
        self.settings.seeders_dir.join(format!(
            "{}Seeder.{}",
            descriptor.name(),
            self.settings.root.extension
        ))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_name(&self, name: &str) -> Result<TargetDescriptor, DomainError> {
        let descriptor = DomainValidator::validate_model_name(name, &self.settings.root)?;
        if self.transaction.target_exists(descriptor.path()) {
            return Err(DomainError::ModelExists {
                name: descriptor.name().to_string(),
                path: descriptor.path().display().to_string(),
            });
        }
        Ok(descriptor)
    }
}

/// `app::models::Author` → `Author`.
fn short_name(qualified: &str) -> &str {
    qualified.rsplit("::").next().unwrap_or(qualified)
}

fn field_variables(field: &FieldSpec) -> Value {
    json!({
        "name": field.name(),
        "type": field.ty().as_str(),
        "rustType": field.rust_type(),
        "sqlType": field.sql_type(),
        "nullable": field.nullable(),
        "length": field.length(),
        "precision": field.precision(),
        "scale": field.scale(),
    })
}

fn relation_variables(relation: &RelationSpec) -> Value {
    let remote = short_name(relation.remote_class());
    let rust_type = if relation.local_is_collection() {
        format!("Vec<{remote}>")
    } else if relation.nullable() == Some(true) {
        format!("Option<{remote}>")
    } else {
        remote.to_string()
    };
    // Only the owning side of a to-one relation has a key column.
    let column = (relation.local_is_owning() && !relation.local_is_collection())
        .then(|| key_column(relation.local_property()));

    json!({
        "name": relation.local_property(),
        "kind": relation.kind().as_str(),
        "targetClass": relation.remote_class(),
        "targetName": remote,
        "targetTable": naming::to_table_name(remote),
        "rustType": rust_type,
        "owning": relation.local_is_owning(),
        "collection": relation.local_is_collection(),
        "nullable": relation.nullable(),
        "orphanRemoval": relation.orphan_removal(),
        "mappedBy": relation.remote_property(),
        "column": column,
    })
}

fn join_table(table: &str, relation: &RelationSpec) -> Value {
    let remote_table = naming::to_table_name(short_name(relation.remote_class()));
    json!({
        "name": format!("{table}_{remote_table}"),
        "localColumn": format!("{}_id", naming::singularize(table)),
        "remoteColumn": format!("{}_id", naming::singularize(&remote_table)),
        "localTable": table,
        "remoteTable": remote_table,
    })
}

/// What the other entity needs for the relation to be navigable from it.
fn inverse_note(descriptor: &TargetDescriptor, relation: &RelationSpec) -> Option<String> {
    let remote = short_name(relation.remote_class());
    let property = relation.remote_property()?;
    let ty = if relation.remote_is_collection() {
        format!("Vec<{}>", descriptor.name())
    } else {
        descriptor.name().to_string()
    };
    let role = if relation.local_is_owning() {
        "inverse side"
    } else {
        "owning side, holds the key"
    };
    Some(format!(
        "{remote}.{property}: {ty} ({role} of {}.{})",
        descriptor.name(),
        relation.local_property()
    ))
}

/// `author` → `author_id`; names already ending in `_id` are kept.
fn key_column(property: &str) -> String {
    let snake = naming::to_snake_case(property);
    if snake.ends_with("_id") {
        snake
    } else {
        format!("{snake}_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ports::{MockEntityLookup, MockFilesystem},
        services::testing::{FixedTemplates, Script, Substitute},
    };
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    fn settings() -> ModelSettings {
        ModelSettings {
            root: ModelRoot::new("/app/src/models", "app::models", "rs"),
            migrations_dir: PathBuf::from("/app/migrations"),
            seeders_dir: PathBuf::from("/app/src/seeders"),
            ..ModelSettings::default()
        }
    }

    fn entities() -> Box<MockEntityLookup> {
        let mut lookup = MockEntityLookup::new();
        lookup
            .expect_known_entities()
            .returning(|| vec!["Author".into(), "User".into()]);
        lookup.expect_resolve().returning(|name| match name {
            "Author" => TargetDescriptor::derive(name, &settings().root).ok(),
            _ => None,
        });
        lookup.expect_is_external().return_const(false);
        Box::new(lookup)
    }

    fn disk(existing: &'static [&'static str]) -> (MockFilesystem, Arc<Mutex<Vec<PathBuf>>>) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .returning(move |p| existing.iter().any(|e| Path::new(e) == p));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let log = Arc::clone(&writes);
        fs.expect_write_file().returning(move |p, _| {
            log.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        (fs, writes)
    }

    fn service(
        answers: &[&str],
        existing: &'static [&'static str],
    ) -> (ModelService, Arc<Mutex<Vec<PathBuf>>>) {
        let (fs, writes) = disk(existing);
        let templates = FixedTemplates(vec![
            ("Model", "struct {{className}}"),
            ("Migration", "CREATE TABLE {{tableName}}"),
            ("Seeder", "{{seederName}}"),
        ]);
        let tx = GenerationTransaction::new(Box::new(templates), Box::new(Substitute), Box::new(fs));
        let prompter = Script::new(answers.iter().copied());
        (
            ModelService::new(Box::new(prompter), entities(), tx, settings()),
            writes,
        )
    }

    #[test]
    fn reserved_and_existing_names_are_asked_again() {
        let (mut svc, _) = service(&["Book"], &["/app/src/models/User.rs"]);

        let d = svc.choose_name(Some("User")).unwrap();
        assert_eq!(d.name(), "Book");
        assert!(matches!(svc.failures()[0], DomainError::ModelExists { .. }));

        let (mut svc, _) = service(&["Book"], &[]);
        svc.choose_name(Some("Struct")).unwrap();
        assert!(matches!(svc.failures()[0], DomainError::ReservedName { .. }));
    }

    #[test]
    fn full_session_plans_and_commits_every_artifact() {
        let answers = [
            "email", "", "", "", // string, length 255, not nullable
            "author", "ManyToOne", "Author", "n", "y", "", "n", // relation
            "",
        ];
        let (mut svc, writes) = service(&answers, &[]);
        let options = GenerationOptions {
            migration: Some("20260101000000".into()),
            seeder: true,
        };

        let planned = svc.run_session(Some("Book"), &options).unwrap();
        assert_eq!(
            planned.paths,
            vec![
                PathBuf::from("/app/src/models/Book.rs"),
                PathBuf::from("/app/migrations/20260101000000_create_books_table.sql"),
                PathBuf::from("/app/src/seeders/BookSeeder.rs"),
            ]
        );
        assert_eq!(planned.schema.len(), 2);

        let previews = svc.preview_all().unwrap();
        assert_eq!(previews[0].1, "struct Book");
        assert_eq!(previews[1].1, "CREATE TABLE books");
        assert_eq!(previews[2].1, "BookSeeder");
        assert!(writes.lock().unwrap().is_empty());

        let written = svc.commit().unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(writes.lock().unwrap().len(), 3);
        assert!(!svc.transaction().has_pending());
    }

    #[test]
    fn variables_describe_fields_and_relations() {
        let (svc, _) = service(&[], &[]);
        let root = &svc.settings().root;
        let book = TargetDescriptor::derive("Book", root).unwrap();
        let mut schema = EntitySchema::new(book.clone());
        schema
            .add(
                FieldSpec::new("title", crate::domain::ScalarType::String, &FieldDefaults::default())
                    .unwrap(),
            )
            .unwrap();
        schema
            .add(
                RelationSpec::builder(RelationKind::ManyToOne, "app::models::Book", "app::models::Author")
                    .owning_property("author")
                    .nullable(true)
                    .inverse_property("books")
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let vars = svc.model_variables(&book, &schema).to_json();
        assert_eq!(vars["className"], "Book");
        assert_eq!(vars["tableName"], "books");
        assert_eq!(vars["fields"][0]["sqlType"], "VARCHAR(255)");
        assert_eq!(vars["relations"][0]["rustType"], "Option<Author>");
        assert_eq!(vars["relations"][0]["column"], "author_id");
        assert_eq!(vars["relations"][0]["mappedBy"], "books");
        assert_eq!(
            vars["inverseNotes"][0],
            "Author.books: Vec<Book> (inverse side of Book.author)"
        );
    }

    #[test]
    fn key_column_keeps_id_suffix() {
        assert_eq!(key_column("author_id"), "author_id");
        assert_eq!(key_column("parentCategory"), "parent_category_id");
    }
}
