//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `modelsmith-adapters` crate provides implementations; the CLI adds the
//! terminal prompter.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{RenderContext, TargetDescriptor};
use crate::error::SmithResult;

/// Port for interactive questions.
///
/// Implemented by:
/// - `modelsmith_adapters::prompter::ScriptedPrompter` (testing, `--yes`)
/// - `modelsmith_cli::prompt::DialoguerPrompter` (terminal)
///
/// Answers are returned raw; validation and retries belong to the caller.
pub trait Prompter: Send + Sync {
    /// Ask a free-text question. An empty answer yields `default` when given.
    fn ask(&self, question: &str, default: Option<&str>) -> SmithResult<String>;

    /// Ask a yes/no question.
    fn confirm(&self, question: &str, default: bool) -> SmithResult<bool>;

    /// Ask with completion over `candidates`. Answers outside the candidates
    /// are allowed.
    fn ask_with_completion(
        &self,
        question: &str,
        candidates: &[String],
        default: Option<&str>,
    ) -> SmithResult<String>;

    /// Print an informational line (type listings, failure reasons).
    fn say(&self, line: &str);
}

/// Port for resolving entities a relation can point to.
///
/// Implemented by:
/// - `modelsmith_adapters::entity_lookup::DirectoryEntityLookup`
#[cfg_attr(test, mockall::automock)]
pub trait EntityLookup: Send + Sync {
    /// Descriptor for a project-owned or external entity, by short or
    /// qualified name.
    fn resolve(&self, name: &str) -> Option<TargetDescriptor>;

    /// Names offered for completion.
    fn known_entities(&self) -> Vec<String>;

    /// Whether the entity is owned outside the project and cannot be edited.
    fn is_external(&self, qualified_name: &str) -> bool;
}

/// Where a template's source comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateRef {
    /// A template file on disk.
    File(PathBuf),
    /// A template embedded in the binary, by name.
    Builtin(String),
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Builtin(name) => write!(f, "builtin:{name}"),
        }
    }
}

/// Port for locating template sources.
///
/// Implemented by:
/// - `modelsmith_adapters::template_store::LayeredTemplateStore`
pub trait TemplateStore: Send + Sync {
    /// Resolve a template name: a literal path first, then the configured
    /// template directory, then the built-in set.
    fn resolve(&self, name: &str) -> SmithResult<TemplateRef>;

    /// Load the source text of a resolved template.
    fn load(&self, template: &TemplateRef) -> SmithResult<String>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `modelsmith_adapters::renderer::HandlebarsRenderer`
pub trait TemplateRenderer: Send + Sync {
    /// Render template source with the given variables.
    fn render(&self, source: &str, context: &RenderContext) -> SmithResult<String>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `modelsmith_adapters::filesystem::LocalFilesystem` (production)
/// - `modelsmith_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SmithResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> SmithResult<()>;
}
