//! Domain value objects: FieldType, RelationKind, TypeCategory.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO catalog logic. Grouping and inference live in
//! `type_catalog.rs`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.
//!
//! # Adding New Types
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add it to `ScalarType::ALL` and, if it belongs to a named category,
//!    to that category's row in `type_catalog.rs`
//! 4. Done. Anything not listed in a row shows up under "other"

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ScalarType ────────────────────────────────────────────────────────────────

/// A column type a plain field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    String,
    Text,
    Boolean,
    Integer,
    SmallInt,
    BigInt,
    Float,
    Decimal,
    Date,
    DateImmutable,
    DateTime,
    DateTimeImmutable,
    DateTimeTz,
    DateTimeTzImmutable,
    Time,
    TimeImmutable,
    DateInterval,
    Array,
    SimpleArray,
    Json,
    Object,
    Binary,
    Blob,
    Guid,
    Uuid,
}

impl ScalarType {
    /// Every scalar type, in declaration order.
    pub const ALL: &'static [ScalarType] = &[
        Self::String,
        Self::Text,
        Self::Boolean,
        Self::Integer,
        Self::SmallInt,
        Self::BigInt,
        Self::Float,
        Self::Decimal,
        Self::Date,
        Self::DateImmutable,
        Self::DateTime,
        Self::DateTimeImmutable,
        Self::DateTimeTz,
        Self::DateTimeTzImmutable,
        Self::Time,
        Self::TimeImmutable,
        Self::DateInterval,
        Self::Array,
        Self::SimpleArray,
        Self::Json,
        Self::Object,
        Self::Binary,
        Self::Blob,
        Self::Guid,
        Self::Uuid,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::SmallInt => "smallint",
            Self::BigInt => "bigint",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::DateImmutable => "date_immutable",
            Self::DateTime => "datetime",
            Self::DateTimeImmutable => "datetime_immutable",
            Self::DateTimeTz => "datetimetz",
            Self::DateTimeTzImmutable => "datetimetz_immutable",
            Self::Time => "time",
            Self::TimeImmutable => "time_immutable",
            Self::DateInterval => "dateinterval",
            Self::Array => "array",
            Self::SimpleArray => "simple_array",
            Self::Json => "json",
            Self::Object => "object",
            Self::Binary => "binary",
            Self::Blob => "blob",
            Self::Guid => "guid",
            Self::Uuid => "uuid",
        }
    }

    /// Whether a `length` attribute applies.
    pub const fn has_length(self) -> bool {
        matches!(self, Self::String)
    }

    /// Whether `precision`/`scale` attributes apply.
    pub const fn has_precision(self) -> bool {
        matches!(self, Self::Decimal)
    }

    /// Rust type used by the generated model struct.
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::String | Self::Text => "String",
            Self::Boolean => "bool",
            Self::Integer => "i32",
            Self::SmallInt => "i16",
            Self::BigInt => "i64",
            Self::Float => "f64",
            Self::Decimal => "rust_decimal::Decimal",
            Self::Date | Self::DateImmutable => "chrono::NaiveDate",
            Self::DateTime | Self::DateTimeImmutable => "chrono::NaiveDateTime",
            Self::DateTimeTz | Self::DateTimeTzImmutable => "chrono::DateTime<chrono::FixedOffset>",
            Self::Time | Self::TimeImmutable => "chrono::NaiveTime",
            Self::DateInterval => "chrono::Duration",
            Self::Array | Self::SimpleArray => "Vec<String>",
            Self::Json | Self::Object => "serde_json::Value",
            Self::Binary | Self::Blob => "Vec<u8>",
            Self::Guid | Self::Uuid => "uuid::Uuid",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RelationKind ──────────────────────────────────────────────────────────────

/// The four relationship shapes a user can pick at the type prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    ManyToOne,
    OneToMany,
    ManyToMany,
    OneToOne,
}

impl RelationKind {
    pub const ALL: &'static [RelationKind] = &[
        Self::ManyToOne,
        Self::OneToMany,
        Self::ManyToMany,
        Self::OneToOne,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManyToOne => "ManyToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToMany => "ManyToMany",
            Self::OneToOne => "OneToOne",
        }
    }

    /// Whether the declaring entity sees a collection.
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "manytoone" => Ok(Self::ManyToOne),
            "onetomany" => Ok(Self::OneToMany),
            "manytomany" => Ok(Self::ManyToMany),
            "onetoone" => Ok(Self::OneToOne),
            _ => Err(DomainError::UnsupportedRelationType { given: s.into() }),
        }
    }
}

// ── FieldType ─────────────────────────────────────────────────────────────────

/// Anything the type prompt accepts: a scalar column or a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldType {
    Scalar(ScalarType),
    Relation(RelationKind),
}

impl FieldType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar(s) => s.as_str(),
            Self::Relation(r) => r.as_str(),
        }
    }

    pub const fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(_))
    }

    /// Every accepted type: scalars first, then relations.
    pub fn all() -> impl Iterator<Item = FieldType> {
        ScalarType::ALL
            .iter()
            .copied()
            .map(Self::Scalar)
            .chain(RelationKind::ALL.iter().copied().map(Self::Relation))
    }
}

impl From<ScalarType> for FieldType {
    fn from(s: ScalarType) -> Self {
        Self::Scalar(s)
    }
}

impl From<RelationKind> for FieldType {
    fn from(r: RelationKind) -> Self {
        Self::Relation(r)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(scalar) = ScalarType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
        {
            return Ok(Self::Scalar(*scalar));
        }
        trimmed
            .parse::<RelationKind>()
            .map(Self::Relation)
            .map_err(|_| DomainError::UnknownFieldType {
                given: trimmed.into(),
            })
    }
}

/// `Many_To-One` → `manytoone`.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ── TypeCategory ──────────────────────────────────────────────────────────────

/// Headings of the grouped type listing, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Main,
    Relation,
    ArrayObject,
    DateTime,
    Other,
}

impl TypeCategory {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Main => "Main Types",
            Self::Relation => "Relationships / Associations",
            Self::ArrayObject => "Array/Object Types",
            Self::DateTime => "Date/Time Types",
            Self::Other => "Other Types",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
