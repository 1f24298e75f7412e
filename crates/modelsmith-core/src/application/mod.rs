//! Application layer for modelsmith.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ModelService, SchemaBuilder,
//!   RelationInterview, GenerationTransaction)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer and owns every retry
//! loop and log line. Modelling rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GenerationOptions, GenerationTransaction, ModelService, ModelSettings, PlannedModel,
    RelationInterview, SchemaBuilder,
};

// Re-export port traits (for adapter implementation)
pub use ports::{EntityLookup, Filesystem, Prompter, TemplateRef, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
