//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not modelling
//! rules. Modelling errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while planning, rendering or writing generated files.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The planned target already exists on disk.
    #[error("the file \"{path}\" can't be generated because it already exists")]
    TargetExists { path: PathBuf },

    /// The target path was already planned in this transaction.
    #[error("\"{path}\" is already planned for generation")]
    AlreadyPlanned { path: PathBuf },

    /// Template resolution failed (neither a path nor a known template).
    #[error("template \"{name}\" could not be resolved: {reason}")]
    TemplateResolution { name: String, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The prompter could not read an answer (closed input, terminal error).
    #[error("could not read answer: {reason}")]
    PromptFailed { reason: String },

    /// `preview` was asked for a path that is not planned.
    #[error("\"{path}\" is not planned in this transaction")]
    NotPlanned { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetExists { path } => vec![
                format!("Remove or rename {}", path.display()),
                "Or choose a different model name".into(),
            ],
            Self::AlreadyPlanned { .. } => {
                vec!["Each file can be planned once per session".into()]
            }
            Self::TemplateResolution { .. } => vec![
                "Check [templates] directory in your configuration".into(),
                "Built-in templates: Model, Migration, Seeder".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Run from an interactive terminal".into(),
                "Or pass --yes to accept defaults".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateResolution { .. } => ErrorCategory::NotFound,
            Self::TargetExists { .. }
            | Self::AlreadyPlanned { .. }
            | Self::RenderingFailed { .. }
            | Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::PromptFailed { .. } | Self::NotPlanned { .. } => ErrorCategory::Internal,
        }
    }
}
