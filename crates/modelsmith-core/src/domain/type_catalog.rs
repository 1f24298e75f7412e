//! Field type catalog.
//!
//! # Design Rationale
//!
//! The listing shown for `?` at the type prompt is driven by one static,
//! ordered table: each named category lists its types exactly once. The
//! trailing "other" category is never written down; it is computed as the set
//! difference between every known type and the types the table already
//! shows, so adding a type without categorising it still lists it.
//!
//! Inference of a suggested type from a field name lives here as well since
//! it is the other half of "which type does this field get".

use std::collections::HashSet;

use crate::domain::naming;
use crate::domain::value_objects::{FieldType, RelationKind, ScalarType, TypeCategory};

// ── Table ─────────────────────────────────────────────────────────────────────

/// One line of the listing: a primary type plus closely related variants
/// (`integer` with `smallint`, `bigint`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub primary: FieldType,
    pub variants: &'static [FieldType],
}

/// A named category and its entries.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRow {
    pub category: TypeCategory,
    pub entries: &'static [CatalogEntry],
}

const fn scalar(primary: ScalarType, variants: &'static [FieldType]) -> CatalogEntry {
    CatalogEntry {
        primary: FieldType::Scalar(primary),
        variants,
    }
}

const fn relation(kind: RelationKind) -> CatalogEntry {
    CatalogEntry {
        primary: FieldType::Relation(kind),
        variants: &[],
    }
}

/// Single source of truth for the grouped listing, in display order.
///
/// `TypeCategory::Other` is intentionally absent; see [`grouped_types`].
pub static TYPE_TABLE: &[CategoryRow] = &[
    CategoryRow {
        category: TypeCategory::Main,
        entries: &[
            scalar(ScalarType::String, &[]),
            scalar(ScalarType::Text, &[]),
            scalar(ScalarType::Boolean, &[]),
            scalar(
                ScalarType::Integer,
                &[
                    FieldType::Scalar(ScalarType::SmallInt),
                    FieldType::Scalar(ScalarType::BigInt),
                ],
            ),
            scalar(ScalarType::Float, &[]),
        ],
    },
    CategoryRow {
        category: TypeCategory::Relation,
        entries: &[
            relation(RelationKind::ManyToOne),
            relation(RelationKind::OneToMany),
            relation(RelationKind::ManyToMany),
            relation(RelationKind::OneToOne),
        ],
    },
    CategoryRow {
        category: TypeCategory::ArrayObject,
        entries: &[
            scalar(
                ScalarType::Array,
                &[FieldType::Scalar(ScalarType::SimpleArray)],
            ),
            scalar(ScalarType::Json, &[]),
            scalar(ScalarType::Object, &[]),
            scalar(ScalarType::Binary, &[]),
            scalar(ScalarType::Blob, &[]),
        ],
    },
    CategoryRow {
        category: TypeCategory::DateTime,
        entries: &[
            scalar(
                ScalarType::DateTime,
                &[FieldType::Scalar(ScalarType::DateTimeImmutable)],
            ),
            scalar(
                ScalarType::DateTimeTz,
                &[FieldType::Scalar(ScalarType::DateTimeTzImmutable)],
            ),
            scalar(
                ScalarType::Date,
                &[FieldType::Scalar(ScalarType::DateImmutable)],
            ),
            scalar(
                ScalarType::Time,
                &[FieldType::Scalar(ScalarType::TimeImmutable)],
            ),
            scalar(ScalarType::DateInterval, &[]),
        ],
    },
];

/// A category with its resolved entries, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGroup {
    pub category: TypeCategory,
    pub entries: Vec<CatalogEntry>,
}

/// The full listing: every table row followed by the computed "other" group.
///
/// Pure; calling it twice yields the same groups.
pub fn grouped_types() -> Vec<TypeGroup> {
    let listed: HashSet<FieldType> = TYPE_TABLE
        .iter()
        .flat_map(|row| row.entries.iter())
        .flat_map(|e| std::iter::once(e.primary).chain(e.variants.iter().copied()))
        .collect();

    let other: Vec<CatalogEntry> = FieldType::all()
        .filter(|t| !listed.contains(t))
        .map(|primary| CatalogEntry {
            primary,
            variants: &[],
        })
        .collect();

    let mut groups: Vec<TypeGroup> = TYPE_TABLE
        .iter()
        .map(|row| TypeGroup {
            category: row.category,
            entries: row.entries.to_vec(),
        })
        .collect();

    if !other.is_empty() {
        groups.push(TypeGroup {
            category: TypeCategory::Other,
            entries: other,
        });
    }
    groups
}

/// The category a type is listed under.
pub fn category_of(ty: FieldType) -> TypeCategory {
    TYPE_TABLE
        .iter()
        .find(|row| {
            row.entries
                .iter()
                .any(|e| e.primary == ty || e.variants.contains(&ty))
        })
        .map_or(TypeCategory::Other, |row| row.category)
}

// ── Inference ─────────────────────────────────────────────────────────────────

/// Suggest a type from a field name.
///
/// The name is normalised to lower snake case first, so `publishedAt`,
/// `PublishedAt` and `published_at` behave the same. Rules, first match wins:
///
/// | Normalised name        | Suggestion           |
/// |------------------------|----------------------|
/// | ends with `_at`/`_date`| `datetime_immutable` |
/// | ends with `_id`        | `integer`            |
/// | starts with `is_`/`has_` | `boolean`          |
/// | exactly `uuid`         | `uuid`               |
/// | exactly `guid`         | `guid`               |
/// | anything else          | `string`             |
pub fn infer_type(field_name: &str) -> FieldType {
    let name = naming::to_snake_case(field_name);

    let scalar = if name.ends_with("_at") || name.ends_with("_date") {
        ScalarType::DateTimeImmutable
    } else if name.ends_with("_id") {
        ScalarType::Integer
    } else if name.starts_with("is_") || name.starts_with("has_") {
        ScalarType::Boolean
    } else if name == "uuid" {
        ScalarType::Uuid
    } else if name == "guid" {
        ScalarType::Guid
    } else {
        ScalarType::String
    };

    FieldType::Scalar(scalar)
}
