//! End-to-end tests for the `modelsmith` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `modelsmith` command running in `dir`, isolated from the user's config.
fn modelsmith(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modelsmith").unwrap();
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env_remove("RUST_LOG");
    cmd
}

fn files_under(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("model"))
        .stdout(predicate::str::contains("types"));
}

#[test]
fn version_matches_package() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn types_are_grouped() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("Main Types"))
        .stdout(predicate::str::contains("string"))
        .stdout(predicate::str::contains("ManyToOne"));
}

#[test]
fn any_no_color_value_is_accepted() {
    let dir = TempDir::new().unwrap();
    for value in ["1", "yes", "true", "0", "false"] {
        modelsmith(dir.path())
            .env("NO_COLOR", value)
            .arg("types")
            .assert()
            .success()
            .stdout(predicate::str::contains("Main Types"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn types_as_json() {
    let dir = TempDir::new().unwrap();
    let out = modelsmith(dir.path())
        .args(["types", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let groups: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(groups[0]["category"], "Main Types");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["model", "Book", "--yes", "--all", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("pub struct Book"));

    assert!(!dir.path().join("src").exists());
    assert!(!dir.path().join("migrations").exists());
}

#[test]
fn model_with_all_artifacts() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["model", "Book", "--yes", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert!(dir.path().join("src/models/Book.rs").is_file());
    assert!(dir.path().join("src/seeders/BookSeeder.rs").is_file());

    let migrations = files_under(&dir.path().join("migrations"));
    assert_eq!(migrations.len(), 1);
    assert!(migrations[0].ends_with("_create_books_table.sql"));
}

#[test]
fn existing_model_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["model", "Book", "--yes"])
        .assert()
        .success();
    let before = std::fs::read_to_string(dir.path().join("src/models/Book.rs")).unwrap();

    // --yes cannot answer the retry question, so the session fails.
    modelsmith(dir.path())
        .args(["model", "Book", "--yes"])
        .assert()
        .failure();

    let after = std::fs::read_to_string(dir.path().join("src/models/Book.rs")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn yes_requires_a_name() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["model", "--yes"])
        .assert()
        .code(2);
}

#[test]
fn list_shows_created_models() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(none)"));

    modelsmith(dir.path())
        .args(["model", "Author", "--yes"])
        .assert()
        .success();

    modelsmith(dir.path())
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crate::models::Author"));
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(dir.path().join("modelsmith.toml").is_file());

    modelsmith(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_copies_templates() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["init", "--templates"])
        .assert()
        .success();

    assert!(dir.path().join("templates/Model.hbs").is_file());
    assert!(dir.path().join("templates/Migration.hbs").is_file());
    assert!(dir.path().join("templates/Seeder.hbs").is_file());
}

#[test]
fn local_config_changes_model_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("modelsmith.toml"),
        "[models]\ndirectory = \"app/entities\"\nnamespace = \"crate::entities\"\n",
    )
    .unwrap();

    modelsmith(dir.path())
        .args(["model", "Tag", "--yes"])
        .assert()
        .success();
    assert!(dir.path().join("app/entities/Tag.rs").is_file());
}

#[test]
fn config_get_known_key() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["config", "get", "models.namespace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crate::models"));
}

#[test]
fn config_get_reads_environment() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .env("MODELSMITH__FIELDS__STRING_LENGTH", "120")
        .args(["config", "get", "fields.string_length"])
        .assert()
        .success()
        .stdout(predicate::str::contains("120"));
}

#[test]
fn config_get_unknown_key() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nope.nothing"));
}

#[test]
fn missing_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .args(["--config", "missing.toml", "types"])
        .assert()
        .code(4);
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    modelsmith(dir.path())
        .arg("frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("frobnicate"));
}
