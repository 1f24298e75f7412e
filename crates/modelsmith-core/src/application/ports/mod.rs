//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `modelsmith-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Prompter`: Interactive questions
//!   - `EntityLookup`: Relation targets and external entities
//!   - `TemplateStore`: Template resolution and loading
//!   - `TemplateRenderer`: Template rendering
//!   - `Filesystem`: File operations
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{EntityLookup, Filesystem, Prompter, TemplateRef, TemplateRenderer, TemplateStore};

#[cfg(test)]
pub use output::{MockEntityLookup, MockFilesystem};
