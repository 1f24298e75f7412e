//! Unified error handling for modelsmith core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions and a coarse category the CLI maps
//! to exit codes.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for modelsmith core operations.
#[derive(Debug, Error, Clone)]
pub enum SmithError {
    /// Errors from the domain layer (validation or invariant violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (planning, rendering, I/O).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SmithError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run: modelsmith config list".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in modelsmith".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Invariant => ErrorCategory::Invariant,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether an interactive session should report this and ask again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_recoverable(),
            _ => false,
        }
    }

    /// The wrapped domain error, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input; the session re-prompts.
    Validation,
    /// A referenced entity or template does not exist.
    NotFound,
    /// A rule of the model was broken; fatal to the current operation.
    Invariant,
    /// Planning or writing files failed.
    Io,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type SmithResult<T> = Result<T, SmithError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> SmithResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> SmithResult<T> {
        self.map_err(|e| SmithError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_recoverable() {
        let err: SmithError = DomainError::EmptyName.into();
        assert!(err.is_recoverable());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn io_errors_are_not_recoverable() {
        let err: SmithError = ApplicationError::AlreadyPlanned {
            path: "/models/User.gen".into(),
        }
        .into();
        assert!(!err.is_recoverable());
        assert_eq!(err.category(), ErrorCategory::Io);
    }

    #[test]
    fn context_wraps_as_internal() {
        let r: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = r.context("formatting").unwrap_err();
        assert!(matches!(err, SmithError::Internal { .. }));
    }
}
