//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "collect a schema" or "write the planned files".

pub mod generation_transaction;
pub mod model_service;
pub mod relation_interview;
pub mod schema_builder;

#[cfg(test)]
pub(crate) mod testing;

pub use generation_transaction::{GenerationTransaction, Payload, PlannedWrite};
pub use model_service::{GenerationOptions, ModelService, ModelSettings, PlannedModel, templates};
pub use relation_interview::RelationInterview;
pub use schema_builder::{LIST_TYPES, SchemaBuilder, type_listing};
