//! Infrastructure adapters for modelsmith.
//!
//! This crate implements the ports defined in `modelsmith-core::application::ports`.
//! It contains all external dependencies and I/O operations, except the
//! terminal prompter, which lives with the CLI.

pub mod builtin_templates;
pub mod entity_lookup;
pub mod filesystem;
pub mod prompter;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use entity_lookup::DirectoryEntityLookup;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompter::ScriptedPrompter;
pub use renderer::HandlebarsRenderer;
pub use template_store::LayeredTemplateStore;
