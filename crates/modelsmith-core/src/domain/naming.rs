//! Naming conventions for generated code.
//!
//! Case conversion and pluralization go through the `inflector` crate; the
//! only local knowledge here is the reserved-word list and what counts as an
//! identifier.

use inflector::Inflector;

use crate::domain::error::DomainError;

/// Words a generated entity may not be named after: Rust keywords (strict and
/// reserved) plus primitive and prelude type names. Compared case-insensitively.
pub const RESERVED_NAMES: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield", "bool", "char",
    "str", "string", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64", "option", "result", "vec", "default",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Check that `name` is an ASCII identifier: a letter first, then letters,
/// digits or underscores.
pub fn validate_identifier(name: &str) -> Result<(), DomainError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(DomainError::EmptyName);
    };
    if !first.is_ascii_alphabetic() {
        return Err(DomainError::InvalidIdentifier {
            name: name.into(),
            reason: "must start with a letter".into(),
        });
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(DomainError::InvalidIdentifier {
            name: name.into(),
            reason: format!("contains '{bad}'"),
        });
    }
    Ok(())
}

/// Entity names: identifiers that are not reserved.
pub fn validate_entity_name(name: &str) -> Result<(), DomainError> {
    validate_identifier(name)?;
    if is_reserved(name) {
        return Err(DomainError::ReservedName { name: name.into() });
    }
    Ok(())
}

pub fn to_snake_case(input: &str) -> String {
    input.to_snake_case()
}

pub fn to_pascal_case(input: &str) -> String {
    input.to_pascal_case()
}

pub fn pluralize(input: &str) -> String {
    input.to_plural()
}

pub fn singularize(input: &str) -> String {
    input.to_singular()
}

/// Default collection property for a class: `BlogPost` → `blog_posts`.
pub fn collection_property(class_name: &str) -> String {
    pluralize(&to_snake_case(class_name))
}

/// Default single-reference property for a class: `BlogPost` → `blog_post`.
pub fn reference_property(class_name: &str) -> String {
    singularize(&to_snake_case(class_name))
}

/// Table name for an entity (`snake_case` plural).
pub fn to_table_name(class_name: &str) -> String {
    collection_property(class_name)
}
