//! Templates embedded in the binary.
//!
//! These are the last layer of [`LayeredTemplateStore`](crate::LayeredTemplateStore)
//! resolution. `modelsmith init --templates` copies them to disk so a project
//! can override them; a file with the same name in the configured template
//! directory wins over the embedded one.
//!
//! Variables available to every template:
//!
//! | name           | value                                            |
//! |----------------|--------------------------------------------------|
//! | `className`    | short entity name (`Book`)                       |
//! | `namespace`    | module path of the models (`crate::models`)      |
//! | `tableName`    | plural snake-case table (`books`)                |
//! | `fields`       | `name type rustType sqlType nullable length ...` |
//! | `relations`    | `name kind targetName rustType column ...`       |
//! | `joinTables`   | one entry per ManyToMany relation                |
//! | `inverseNotes` | lines describing the other side of a relation    |
//!
//! The seeder template also receives `seederName`.

/// Template file extension used when copying built-ins to disk.
pub const EXTENSION: &str = "hbs";

pub const MODEL: &str = r#"//! {{className}} model.
{{#if inverseNotes}}
//
// Bidirectional relations: add the other side by hand.
{{#each inverseNotes}}
//   {{this}}
{{/each}}
{{/if}}

#[derive(Debug, Clone, PartialEq)]
pub struct {{className}} {
    pub id: i64,
{{#each fields}}
    pub {{name}}: {{rustType}},
{{/each}}
{{#each relations}}
    /// {{kind}} {{targetClass}}{{#if mappedBy}} ({{#if owning}}inversed by{{else}}mapped by{{/if}} `{{mappedBy}}`){{/if}}{{#if orphanRemoval}}, orphan removal{{/if}}
    pub {{name}}: {{rustType}},
{{/each}}
}
"#;

pub const MIGRATION: &str = r#"-- {{className}}
CREATE TABLE {{tableName}} (
    id BIGINT NOT NULL PRIMARY KEY{{#each fields}},
    {{name}} {{sqlType}}{{#unless nullable}} NOT NULL{{/unless}}{{/each}}{{#each relations}}{{#if column}},
    {{column}} BIGINT{{#unless nullable}} NOT NULL{{/unless}} REFERENCES {{targetTable}} (id){{#if orphanRemoval}} ON DELETE CASCADE{{/if}}{{/if}}{{/each}}
);
{{#each joinTables}}

CREATE TABLE {{name}} (
    {{localColumn}} BIGINT NOT NULL REFERENCES {{localTable}} (id),
    {{remoteColumn}} BIGINT NOT NULL REFERENCES {{remoteTable}} (id),
    PRIMARY KEY ({{localColumn}}, {{remoteColumn}})
);
{{/each}}
"#;

pub const SEEDER: &str = r#"use {{namespace}}::{{className}};

/// Seeds `{{tableName}}`.
pub struct {{seederName}};

impl {{seederName}} {
    pub fn records() -> Vec<{{className}}> {
        Vec::new()
    }
}
"#;

/// Every built-in template, by name.
pub fn all() -> &'static [(&'static str, &'static str)] {
    &[("Model", MODEL), ("Migration", MIGRATION), ("Seeder", SEEDER)]
}

/// Source of a built-in template.
pub fn get(name: &str) -> Option<&'static str> {
    all()
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

/// Names of the built-in templates.
pub fn names() -> impl Iterator<Item = &'static str> {
    all().iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HandlebarsRenderer;
    use modelsmith_core::{application::ports::TemplateRenderer, domain::RenderContext};
    use serde_json::json;

    fn book() -> RenderContext {
        RenderContext::new()
            .with("className", "Book")
            .with("namespace", "crate::models")
            .with("tableName", "books")
            .with("seederName", "BookSeeder")
            .with(
                "fields",
                json!([{
                    "name": "title", "type": "string", "rustType": "String",
                    "sqlType": "VARCHAR(255)", "nullable": false
                }]),
            )
            .with(
                "relations",
                json!([
                    {
                        "name": "author", "kind": "ManyToOne", "targetClass": "crate::models::Author",
                        "targetName": "Author", "targetTable": "authors", "rustType": "Author",
                        "owning": true, "collection": false, "nullable": false,
                        "orphanRemoval": true, "mappedBy": "books", "column": "author_id"
                    },
                    {
                        "name": "tags", "kind": "ManyToMany", "targetClass": "crate::models::Tag",
                        "targetName": "Tag", "targetTable": "tags", "rustType": "Vec<Tag>",
                        "owning": true, "collection": true, "nullable": null,
                        "orphanRemoval": false, "mappedBy": null, "column": null
                    }
                ]),
            )
            .with(
                "joinTables",
                json!([{
                    "name": "books_tags", "localColumn": "book_id", "remoteColumn": "tag_id",
                    "localTable": "books", "remoteTable": "tags"
                }]),
            )
            .with(
                "inverseNotes",
                json!(["Author.books: Vec<Book> (inverse side of Book.author)"]),
            )
    }

    fn render(source: &str) -> String {
        HandlebarsRenderer::new().strict().render(source, &book()).unwrap()
    }

    #[test]
    fn model_lists_fields_relations_and_notes() {
        let out = render(MODEL);
        assert!(out.contains("pub struct Book {"));
        assert!(out.contains("pub title: String,"));
        assert!(out.contains("pub author: Author,"));
        assert!(out.contains("pub tags: Vec<Tag>,"));
        assert!(out.contains("Author.books: Vec<Book>"));
    }

    #[test]
    fn migration_has_key_columns_and_join_tables() {
        let out = render(MIGRATION);
        assert!(out.contains("CREATE TABLE books ("));
        assert!(out.contains("title VARCHAR(255) NOT NULL"));
        assert!(out.contains("author_id BIGINT NOT NULL REFERENCES authors (id) ON DELETE CASCADE"));
        assert!(!out.contains("tags BIGINT"));
        assert!(out.contains("CREATE TABLE books_tags ("));
    }

    #[test]
    fn seeder_uses_seeder_name() {
        let out = render(SEEDER);
        assert!(out.contains("use crate::models::Book;"));
        assert!(out.contains("pub struct BookSeeder;"));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(names().collect::<Vec<_>>(), ["Model", "Migration", "Seeder"]);
        assert!(get("Model").is_some());
        assert!(get("model").is_none());
    }
}
