use crate::domain::{
    entities::{FieldDefaults, ModelRoot, TargetDescriptor},
    error::DomainError,
    naming,
};

/// Centralized domain validation.
///
/// Entry points for checks the application layer runs on raw user input
/// before building domain values from it.
pub struct DomainValidator;

impl DomainValidator {
    /// A property (field or relation) name.
    pub fn validate_property_name(name: &str) -> Result<(), DomainError> {
        naming::validate_identifier(name)
    }

    /// A model name, returning the descriptor it derives to.
    pub fn validate_model_name(
        name: &str,
        root: &ModelRoot,
    ) -> Result<TargetDescriptor, DomainError> {
        TargetDescriptor::derive(name.trim(), root)
    }

    pub fn validate_field_defaults(defaults: &FieldDefaults) -> Result<(), DomainError> {
        defaults.validate()
    }

    /// Parse a positive integer attribute answer.
    pub fn parse_attribute(attribute: &'static str, raw: &str) -> Result<u32, DomainError> {
        raw.trim()
            .parse::<u32>()
            .map_err(|e| DomainError::InvalidAttribute {
                attribute,
                given: raw.trim().to_string(),
                reason: e.to_string(),
            })
    }
}
