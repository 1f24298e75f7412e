//! `FieldSpec`: one scalar column of an entity.
//!
//! Type-specific attributes are modelled so they can only exist where they
//! apply: `length` for `string`, `precision`/`scale` for `decimal`. The
//! constructor fills them from [`FieldDefaults`]; the `with_*` methods
//! override and validate them.

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, naming, value_objects::ScalarType};

/// Highest decimal precision the generated schema accepts.
pub const MAX_DECIMAL_PRECISION: u32 = 65;

/// Default attribute values applied to new fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub string_length: u32,
    pub decimal_precision: u32,
    pub decimal_scale: u32,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            string_length: 255,
            decimal_precision: 10,
            decimal_scale: 0,
        }
    }
}

impl FieldDefaults {
    /// Check the defaults themselves obey the attribute rules.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_length(self.string_length)?;
        check_precision(self.decimal_precision)?;
        check_scale(self.decimal_scale, self.decimal_precision)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    #[serde(rename = "type")]
    ty: ScalarType,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scale: Option<u32>,
    nullable: bool,
}

impl FieldSpec {
    /// A non-nullable field with default attributes for its type.
    pub fn new(
        name: impl Into<String>,
        ty: ScalarType,
        defaults: &FieldDefaults,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        naming::validate_identifier(&name)?;
        Ok(Self {
            name,
            ty,
            length: ty.has_length().then_some(defaults.string_length),
            precision: ty.has_precision().then_some(defaults.decimal_precision),
            scale: ty.has_precision().then_some(defaults.decimal_scale),
            nullable: false,
        })
    }

    pub fn with_length(mut self, length: u32) -> Result<Self, DomainError> {
        if !self.ty.has_length() {
            return Err(not_applicable("length", self.ty));
        }
        check_length(length)?;
        self.length = Some(length);
        Ok(self)
    }

    /// Set precision and scale together; scale is checked against the new
    /// precision.
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Result<Self, DomainError> {
        if !self.ty.has_precision() {
            return Err(not_applicable("precision", self.ty));
        }
        check_precision(precision)?;
        check_scale(scale, precision)?;
        self.precision = Some(precision);
        self.scale = Some(scale);
        Ok(self)
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn ty(&self) -> ScalarType {
        self.ty
    }

    pub const fn length(&self) -> Option<u32> {
        self.length
    }

    pub const fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub const fn scale(&self) -> Option<u32> {
        self.scale
    }

    pub const fn nullable(&self) -> bool {
        self.nullable
    }

    /// Rust type of the generated struct member, wrapped in `Option` when
    /// nullable.
    pub fn rust_type(&self) -> String {
        let base = self.ty.rust_type();
        if self.nullable {
            format!("Option<{base}>")
        } else {
            base.to_string()
        }
    }

    /// SQL column type for the generated migration.
    pub fn sql_type(&self) -> String {
        match (self.ty, self.length, self.precision, self.scale) {
            (ScalarType::String, Some(len), _, _) => format!("VARCHAR({len})"),
            (ScalarType::Decimal, _, Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
            (ty, ..) => sql_base_type(ty).to_string(),
        }
    }
}

fn sql_base_type(ty: ScalarType) -> &'static str {
    match ty {
        ScalarType::String => "VARCHAR(255)",
        ScalarType::Text | ScalarType::Array | ScalarType::SimpleArray => "TEXT",
        ScalarType::Boolean => "BOOLEAN",
        ScalarType::Integer => "INTEGER",
        ScalarType::SmallInt => "SMALLINT",
        ScalarType::BigInt => "BIGINT",
        ScalarType::Float => "DOUBLE PRECISION",
        ScalarType::Decimal => "DECIMAL",
        ScalarType::Date | ScalarType::DateImmutable => "DATE",
        ScalarType::DateTime | ScalarType::DateTimeImmutable => "TIMESTAMP",
        ScalarType::DateTimeTz | ScalarType::DateTimeTzImmutable => "TIMESTAMPTZ",
        ScalarType::Time | ScalarType::TimeImmutable => "TIME",
        ScalarType::DateInterval => "INTERVAL",
        ScalarType::Json | ScalarType::Object => "JSON",
        ScalarType::Binary | ScalarType::Blob => "BLOB",
        ScalarType::Guid | ScalarType::Uuid => "UUID",
    }
}

fn not_applicable(attribute: &'static str, ty: ScalarType) -> DomainError {
    DomainError::InvalidAttribute {
        attribute,
        given: ty.to_string(),
        reason: format!("{attribute} does not apply to {ty} fields"),
    }
}

pub(crate) fn check_length(length: u32) -> Result<(), DomainError> {
    if length == 0 {
        return Err(DomainError::InvalidAttribute {
            attribute: "length",
            given: length.to_string(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

pub(crate) fn check_precision(precision: u32) -> Result<(), DomainError> {
    if !(1..=MAX_DECIMAL_PRECISION).contains(&precision) {
        return Err(DomainError::InvalidAttribute {
            attribute: "precision",
            given: precision.to_string(),
            reason: format!("must be between 1 and {MAX_DECIMAL_PRECISION}"),
        });
    }
    Ok(())
}

pub(crate) fn check_scale(scale: u32, precision: u32) -> Result<(), DomainError> {
    if scale > precision {
        return Err(DomainError::InvalidAttribute {
            attribute: "scale",
            given: scale.to_string(),
            reason: format!("cannot exceed precision ({precision})"),
        });
    }
    Ok(())
}
