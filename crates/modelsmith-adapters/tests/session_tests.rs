//! End-to-end sessions over the real adapters: scripted answers in,
//! rendered files in a memory (or temp) filesystem out.

use std::path::{Path, PathBuf};

use modelsmith_adapters::{
    DirectoryEntityLookup, HandlebarsRenderer, LayeredTemplateStore, LocalFilesystem,
    MemoryFilesystem, ScriptedPrompter,
};
use modelsmith_core::{
    application::ApplicationError,
    domain::DomainError,
    prelude::*,
};
use tempfile::TempDir;

const STAMP: &str = "20260101000000";

fn settings(base: &Path) -> ModelSettings {
    ModelSettings {
        root: ModelRoot::new(base.join("src/models"), "crate::models", "rs"),
        migrations_dir: base.join("migrations"),
        seeders_dir: base.join("src/seeders"),
        ..ModelSettings::default()
    }
}

fn service(fs: &MemoryFilesystem, answers: &[&str]) -> ModelService {
    let settings = settings(Path::new("/app"));
    let entities = DirectoryEntityLookup::from_names(
        settings.root.clone(),
        ["Author", "Tag"],
        vec!["vendor::auth::User".into()],
    );
    let tx = GenerationTransaction::new(
        Box::new(LayeredTemplateStore::new()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(fs.clone()),
    );
    ModelService::new(
        Box::new(ScriptedPrompter::new(answers.iter().copied())),
        Box::new(entities),
        tx,
        settings,
    )
}

fn all_artifacts() -> GenerationOptions {
    GenerationOptions {
        migration: Some(STAMP.into()),
        seeder: true,
    }
}

#[test]
fn full_session_writes_model_migration_and_seeder() {
    let fs = MemoryFilesystem::new();
    let mut service = service(
        &fs,
        &[
            "title", "string", "", "", //
            "author", "ManyToOne", "Author", "no", "yes", "books", "yes", //
            "tags", "ManyToMany", "Tag", "no", //
            "",
        ],
    );

    let planned = service.run_session(Some("Book"), &all_artifacts()).unwrap();
    assert_eq!(planned.schema.len(), 3);
    assert!(fs.list_files().is_empty(), "nothing is written before commit");

    let written = service.commit().unwrap();
    let model = PathBuf::from("/app/src/models/Book.rs");
    let migration = PathBuf::from(format!("/app/migrations/{STAMP}_create_books_table.sql"));
    let seeder = PathBuf::from("/app/src/seeders/BookSeeder.rs");
    assert_eq!(written, vec![model.clone(), migration.clone(), seeder.clone()]);

    let model = fs.read_file(&model).unwrap();
    assert!(model.contains("pub struct Book {"));
    assert!(model.contains("pub title: String,"));
    assert!(model.contains("pub author: Author,"));
    assert!(model.contains("pub tags: Vec<Tag>,"));
    assert!(model.contains("Author.books: Vec<Book>"));

    let migration = fs.read_file(&migration).unwrap();
    assert!(migration.contains("CREATE TABLE books ("));
    assert!(migration.contains("author_id BIGINT NOT NULL REFERENCES authors (id)"));
    assert!(migration.contains("CREATE TABLE books_tags ("));

    assert!(fs.read_file(&seeder).unwrap().contains("pub struct BookSeeder;"));
    assert!(service.failures().is_empty());
}

#[test]
fn new_entity_can_relate_to_itself() {
    let fs = MemoryFilesystem::new();
    let mut service = service(
        &fs,
        &["parent", "ManyToOne", "Category", "y", "y", "children", ""],
    );

    let planned = service
        .run_session(Some("Category"), &all_artifacts())
        .unwrap();

    let rel = planned.schema.relations().next().unwrap();
    assert!(rel.is_self_referencing());
    assert_eq!(rel.owning_class(), "crate::models::Category");
    assert_eq!(rel.owning_property(), "parent");
    assert_eq!(rel.inverse_property(), Some("children"));
    assert_eq!(rel.nullable(), Some(true));
    assert!(service.failures().is_empty());

    service.commit().unwrap();
    let migration = fs
        .read_file(Path::new(&format!(
            "/app/migrations/{STAMP}_create_categories_table.sql"
        )))
        .unwrap();
    assert!(migration.contains("parent_id BIGINT REFERENCES categories (id)"));
}

#[test]
fn nullable_many_to_one_never_asks_orphan_removal() {
    let prompter = ScriptedPrompter::new(["author", "ManyToOne", "Author", "yes", "yes", "", ""]);
    let root = settings(Path::new("/app")).root;
    let entities = DirectoryEntityLookup::from_names(root.clone(), ["Author"], Vec::new());
    let book = TargetDescriptor::derive("Book", &root).unwrap();

    let schema = SchemaBuilder::new(book, &prompter, &entities, FieldDefaults::default())
        .run()
        .unwrap();

    let rel = schema.relations().next().unwrap();
    assert_eq!(rel.nullable(), Some(true));
    assert!(!rel.orphan_removal());
    assert_eq!(rel.inverse_property(), Some("books"));
    assert!(!prompter.transcript().iter().any(|q| q.contains("orphan")));
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn relation_to_external_entity_skips_mapping_question() {
    let fs = MemoryFilesystem::new();
    let mut service = service(&fs, &["owner", "ManyToOne", "User", "no", ""]);

    let planned = service
        .run_session(Some("Book"), &GenerationOptions::default())
        .unwrap();

    let rel = planned.schema.relations().next().unwrap();
    assert_eq!(rel.inverse_class(), "vendor::auth::User");
    assert!(!rel.map_inverse_relation());
    assert_eq!(rel.inverse_property(), None);
}

#[test]
fn existing_model_name_is_rejected_and_asked_again() {
    let fs = MemoryFilesystem::new().with_file("/app/src/models/Book.rs", "pub struct Book;");
    let mut service = service(&fs, &["Novel", ""]);

    let planned = service
        .run_session(Some("Book"), &GenerationOptions::default())
        .unwrap();

    assert_eq!(planned.descriptor.name(), "Novel");
    assert!(matches!(
        service.failures()[0],
        DomainError::ModelExists { .. }
    ));
}

#[test]
fn dry_run_previews_without_writing() {
    let fs = MemoryFilesystem::new();
    let mut service = service(&fs, &["email", "", "", "", ""]);

    service
        .run_session(Some("User"), &GenerationOptions::default())
        .unwrap();
    let previews = service.preview_all().unwrap();
    service.discard();

    assert_eq!(previews.len(), 1);
    assert!(previews[0].1.contains("pub email: String,"));
    assert!(fs.list_files().is_empty());
    assert!(!service.transaction().has_pending());
}

#[test]
fn same_target_planned_twice_is_written_once() {
    let fs = MemoryFilesystem::new();
    let mut tx = GenerationTransaction::new(
        Box::new(LayeredTemplateStore::new()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(fs.clone()),
    );
    let vars = RenderContext::new().with("className", "User");

    tx.plan("/models/User.gen", "Model", vars.clone()).unwrap();
    assert!(tx.has_pending());
    assert!(tx.has_pending());
    let err = tx
        .plan("/models/User.gen", "Seeder", vars)
        .unwrap_err();
    assert!(matches!(
        err,
        SmithError::Application(ApplicationError::AlreadyPlanned { .. })
    ));

    tx.commit().unwrap();
    assert_eq!(fs.list_files(), vec![PathBuf::from("/models/User.gen")]);
    assert!(!tx.has_pending());
}

#[test]
fn session_aborted_before_commit_leaves_disk_untouched() {
    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path());
    let tx = GenerationTransaction::new(
        Box::new(LayeredTemplateStore::new()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let entities = DirectoryEntityLookup::scan(settings.root.clone(), Vec::new());
    // The script runs out in the middle of the second property.
    let mut service = ModelService::new(
        Box::new(ScriptedPrompter::new(["title", "string", "", "", "body"])),
        Box::new(entities),
        tx,
        settings,
    );

    let err = service
        .run_session(Some("Post"), &GenerationOptions::default())
        .unwrap_err();

    assert!(matches!(
        err,
        SmithError::Application(ApplicationError::PromptFailed { .. })
    ));
    assert!(!dir.path().join("src").exists());
}

#[test]
fn committed_files_land_on_disk_and_become_entities() {
    let dir = TempDir::new().unwrap();
    let settings = settings(dir.path());
    let tx = GenerationTransaction::new(
        Box::new(LayeredTemplateStore::new()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let mut service = ModelService::new(
        Box::new(ScriptedPrompter::accept_defaults()),
        Box::new(DirectoryEntityLookup::scan(settings.root.clone(), Vec::new())),
        tx,
        settings.clone(),
    );

    service
        .run_session(Some("Author"), &GenerationOptions::default())
        .unwrap();
    service.commit().unwrap();

    let lookup = DirectoryEntityLookup::scan(settings.root, Vec::new());
    assert_eq!(lookup.known_entities(), vec!["Author"]);
}
