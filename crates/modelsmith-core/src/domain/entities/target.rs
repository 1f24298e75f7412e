//! The `TargetDescriptor` value and the `ModelRoot` it is derived from.
//!
//! A descriptor names one generated artifact: the entity name, where its file
//! goes, and the namespace generated code and cross-entity lookups use. Path
//! and namespace are never chosen freely; they follow from the name and the
//! configured root, so the same name always lands in the same place.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, naming};

// ── ModelRoot ─────────────────────────────────────────────────────────────────

/// Where models live and how they are qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRoot {
    /// Directory generated model files are written to.
    pub directory: PathBuf,
    /// Namespace (module path) of generated models, e.g. `crate::models`.
    pub namespace: String,
    /// File extension without the dot.
    pub extension: String,
}

impl ModelRoot {
    pub fn new(
        directory: impl Into<PathBuf>,
        namespace: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            namespace: namespace.into(),
            extension: extension.into(),
        }
    }

    /// File path a model with this name would occupy.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{}", self.extension))
    }
}

impl Default for ModelRoot {
    fn default() -> Self {
        Self::new("src/models", "crate::models", "rs")
    }
}

// ── TargetDescriptor ──────────────────────────────────────────────────────────

/// Immutable description of one generated (or referenced) entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetDescriptor {
    name: String,
    path: PathBuf,
    namespace: String,
}

impl TargetDescriptor {
    /// Derive a descriptor for an entity owned by this project.
    ///
    /// Rejects empty, non-identifier and reserved names.
    pub fn derive(name: impl Into<String>, root: &ModelRoot) -> Result<Self, DomainError> {
        let name = name.into();
        naming::validate_entity_name(&name)?;
        Ok(Self {
            path: root.path_for(&name),
            namespace: root.namespace.clone(),
            name,
        })
    }

    /// Descriptor for an entity owned outside this project.
    ///
    /// `qualified` may be a bare name or `namespace::Name`. External entities
    /// are never written, so they carry an empty path.
    pub fn external(qualified: &str) -> Result<Self, DomainError> {
        let (namespace, name) = match qualified.rsplit_once("::") {
            Some((ns, name)) => (ns.to_string(), name.to_string()),
            None => (String::new(), qualified.to_string()),
        };
        naming::validate_identifier(&name)?;
        Ok(Self {
            name,
            path: PathBuf::new(),
            namespace,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// `namespace::Name`, or just `Name` without a namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    /// Database table name (`snake_case` plural).
    pub fn table_name(&self) -> String {
        naming::to_table_name(&self.name)
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
