// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for modelsmith.
//!
//! This module contains pure modelling logic: descriptors, field and relation
//! specs, the type catalog and naming rules. All I/O, prompting and rendering
//! concerns are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, prompts or logging
//! - **Few crates**: std, thiserror, serde, inflector
//! - **Immutable values**: descriptors and specs are validated on construction
//!
pub mod entities;
pub mod error;
pub mod naming;
pub mod type_catalog;
pub mod value_objects;

mod validation;

pub use entities::{
    EntitySchema, FieldDefaults, FieldSpec, ModelRoot, Property, RelationShape, RelationSpec,
    RelationSpecBuilder, RenderContext, Side, TargetDescriptor,
};

pub use error::{DomainError, ErrorCategory};

pub use type_catalog::{CatalogEntry, TypeGroup, category_of, grouped_types, infer_type};

pub use value_objects::{FieldType, RelationKind, ScalarType, TypeCategory};

pub use validation::DomainValidator;
