//! modelsmith core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the modelsmith
//! entity scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          modelsmith-cli (CLI)           │
//! │   (clap commands, dialoguer prompter)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ModelService, SchemaBuilder,          │
//! │   RelationInterview, Transaction)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Prompter, EntityLookup, TemplateStore, │
//! │  TemplateRenderer, Filesystem)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    modelsmith-adapters (Infrastructure) │
//! │ (LocalFilesystem, HandlebarsRenderer..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (TargetDescriptor, FieldSpec,          │
//! │   RelationSpec, TypeCatalog)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modelsmith_core::prelude::*;
//!
//! let tx = GenerationTransaction::new(store, renderer, filesystem);
//! let mut service = ModelService::new(prompter, entities, tx, ModelSettings::default());
//!
//! let planned = service.run_session(Some("Book"), &GenerationOptions::default())?;
//! service.commit()?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationOptions, GenerationTransaction, ModelService, ModelSettings, PlannedModel,
        SchemaBuilder,
        ports::{EntityLookup, Filesystem, Prompter, TemplateRef, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        EntitySchema, FieldDefaults, FieldSpec, FieldType, ModelRoot, RelationKind, RelationSpec,
        RenderContext, ScalarType, TargetDescriptor,
    };
    pub use crate::error::{SmithError, SmithResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
