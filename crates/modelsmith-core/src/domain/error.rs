// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the schema builder keeps a failure log)
/// - Categorizable (recoverable validation vs. invariant violation)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (recoverable, the session re-prompts)
    // ========================================================================
    #[error("name cannot be empty")]
    EmptyName,

    #[error("'{name}' is not a valid identifier: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    #[error("the name \"{name}\" is reserved by the target platform")]
    ReservedName { name: String },

    #[error("invalid type \"{given}\"")]
    UnknownFieldType { given: String },

    #[error("invalid {attribute} '{given}': {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        given: String,
        reason: String,
    },

    #[error("model '{name}' already exists at {path}")]
    ModelExists { name: String, path: String },

    #[error("'{entity}' is owned outside this project: {reason}")]
    ExternalEntity { entity: String, reason: String },

    // ========================================================================
    // Not Found Errors (recoverable)
    // ========================================================================
    #[error("entity \"{name}\" could not be found")]
    EntityNotFound { name: String },

    // ========================================================================
    // Invariant Violations (fatal to the current operation)
    // ========================================================================
    #[error("the \"{name}\" property already exists on {entity}")]
    DuplicateProperty { name: String, entity: String },

    #[error("'{given}' is not a relation type")]
    UnsupportedRelationType { given: String },

    #[error("invalid relation: {0}")]
    InvalidRelation(String),

    #[error("required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyName => vec!["Type a name, or press <return> on the field prompt to stop".into()],
            Self::InvalidIdentifier { .. } => vec![
                "Start with a letter and use letters, digits and underscores".into(),
                "Examples: title, published_at, UserProfile".into(),
            ],
            Self::ReservedName { name } => vec![
                format!("'{name}' collides with a keyword or primitive type"),
                "Pick a more specific name, e.g. add a domain prefix".into(),
            ],
            Self::UnknownFieldType { .. } => vec![
                "Type ? at the type prompt to see every supported type".into(),
                "Or run: modelsmith types".into(),
            ],
            Self::ModelExists { path, .. } => vec![
                format!("A model file already exists at {path}"),
                "Choose a different name or remove the existing file".into(),
            ],
            Self::EntityNotFound { .. } => vec![
                "Relations can only target entities known to this project".into(),
                "Run: modelsmith list".into(),
            ],
            Self::ExternalEntity { entity, .. } => vec![
                format!("'{entity}' cannot be modified by this project"),
                "Declare the relation from the other side instead".into(),
            ],
            Self::DuplicateProperty { name, .. } => vec![
                format!("'{name}' was already added in this session"),
                "Restart the session to redefine the property".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for display styling and retry decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyName
            | Self::InvalidIdentifier { .. }
            | Self::ReservedName { .. }
            | Self::UnknownFieldType { .. }
            | Self::InvalidAttribute { .. }
            | Self::ModelExists { .. }
            | Self::ExternalEntity { .. } => ErrorCategory::Validation,
            Self::EntityNotFound { .. } => ErrorCategory::NotFound,
            Self::DuplicateProperty { .. }
            | Self::UnsupportedRelationType { .. }
            | Self::InvalidRelation(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Invariant,
        }
    }

    /// Whether the session should report this failure and ask again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::NotFound
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Invariant,
}
