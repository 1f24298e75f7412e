//! `RelationSpec`: one association between two entities.
//!
//! # Representation
//!
//! A relation is stored in canonical orientation: the *owning* side is the
//! one holding the key column. The shape carries only the flags that mean
//! something for it:
//!
//! | Shape        | nullable | orphan removal |
//! |--------------|----------|----------------|
//! | `ManyToOne`  | yes      | yes            |
//! | `OneToOne`   | yes      | no             |
//! | `ManyToMany` | no       | no             |
//!
//! One-to-many has no shape of its own. It is the many-to-one shape declared
//! from the inverse side, so "the many side owns the key" holds structurally;
//! [`RelationSpec::kind`] recovers the kind the user picked from
//! [`RelationSpec::declared_from`].
//!
//! # Invariants (checked by [`RelationSpecBuilder::build`])
//!
//! 1. orphan removal implies not nullable and a mapped inverse side
//! 2. `inverse_property` is present iff the inverse side is mapped
//! 3. many-to-many never carries nullable or orphan removal
//!
//! Relations declared from the inverse side need the inverse mapped, since
//! the declaring entity's own property *is* the inverse property.

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, naming, value_objects::RelationKind};

// ── Shape & side ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum RelationShape {
    ManyToOne { nullable: bool, orphan_removal: bool },
    OneToOne { nullable: bool },
    ManyToMany,
}

/// Which end of the relation the user was editing when declaring it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Owning,
    Inverse,
}

// ── RelationSpec ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSpec {
    shape: RelationShape,
    declared_from: Side,
    owning_class: String,
    inverse_class: String,
    owning_property: String,
    inverse_property: Option<String>,
}

impl RelationSpec {
    /// Start building a relation of `kind` from `owning_class` to
    /// `inverse_class` (both qualified names).
    ///
    /// For [`RelationKind::OneToMany`] pass the classes in canonical order:
    /// the owning class is the *target* entity holding the key.
    pub fn builder(
        kind: RelationKind,
        owning_class: impl Into<String>,
        inverse_class: impl Into<String>,
    ) -> RelationSpecBuilder {
        RelationSpecBuilder {
            kind,
            owning_class: owning_class.into(),
            inverse_class: inverse_class.into(),
            owning_property: None,
            inverse_property: None,
            nullable: None,
            orphan_removal: None,
        }
    }

    /// The kind as seen from the declaring entity.
    pub const fn kind(&self) -> RelationKind {
        match (self.shape, self.declared_from) {
            (RelationShape::ManyToOne { .. }, Side::Owning) => RelationKind::ManyToOne,
            (RelationShape::ManyToOne { .. }, Side::Inverse) => RelationKind::OneToMany,
            (RelationShape::OneToOne { .. }, _) => RelationKind::OneToOne,
            (RelationShape::ManyToMany, _) => RelationKind::ManyToMany,
        }
    }

    pub const fn shape(&self) -> RelationShape {
        self.shape
    }

    pub const fn declared_from(&self) -> Side {
        self.declared_from
    }

    pub fn owning_class(&self) -> &str {
        &self.owning_class
    }

    pub fn inverse_class(&self) -> &str {
        &self.inverse_class
    }

    pub fn owning_property(&self) -> &str {
        &self.owning_property
    }

    pub fn inverse_property(&self) -> Option<&str> {
        self.inverse_property.as_deref()
    }

    pub const fn map_inverse_relation(&self) -> bool {
        self.inverse_property.is_some()
    }

    /// `None` for many-to-many, which has no key column to be null.
    pub const fn nullable(&self) -> Option<bool> {
        match self.shape {
            RelationShape::ManyToOne { nullable, .. } | RelationShape::OneToOne { nullable } => {
                Some(nullable)
            }
            RelationShape::ManyToMany => None,
        }
    }

    pub const fn orphan_removal(&self) -> bool {
        matches!(
            self.shape,
            RelationShape::ManyToOne {
                orphan_removal: true,
                ..
            }
        )
    }

    pub fn is_self_referencing(&self) -> bool {
        self.owning_class == self.inverse_class
    }

    // ── Declaring-entity view ─────────────────────────────────────────────────

    /// Property name on the entity the relation was declared from.
    pub fn local_property(&self) -> &str {
        match self.declared_from {
            Side::Owning => &self.owning_property,
            // Builder guarantees the inverse is mapped when declared from it.
            Side::Inverse => self.inverse_property.as_deref().unwrap_or_default(),
        }
    }

    /// Qualified name of the entity at the other end.
    pub fn remote_class(&self) -> &str {
        match self.declared_from {
            Side::Owning => &self.inverse_class,
            Side::Inverse => &self.owning_class,
        }
    }

    /// Property name at the other end, if that side is mapped.
    pub fn remote_property(&self) -> Option<&str> {
        match self.declared_from {
            Side::Owning => self.inverse_property.as_deref(),
            Side::Inverse => Some(&self.owning_property),
        }
    }

    pub const fn local_is_owning(&self) -> bool {
        matches!(self.declared_from, Side::Owning)
    }

    /// Whether the declaring entity holds a collection of the remote one.
    pub const fn local_is_collection(&self) -> bool {
        self.kind().is_collection()
    }

    /// Whether the remote entity holds a collection of the declaring one.
    pub const fn remote_is_collection(&self) -> bool {
        match self.kind() {
            RelationKind::ManyToOne | RelationKind::ManyToMany => true,
            RelationKind::OneToMany | RelationKind::OneToOne => false,
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Collects relation answers and validates them as a whole in [`build`].
///
/// [`build`]: RelationSpecBuilder::build
#[derive(Debug, Clone)]
pub struct RelationSpecBuilder {
    kind: RelationKind,
    owning_class: String,
    inverse_class: String,
    owning_property: Option<String>,
    inverse_property: Option<String>,
    nullable: Option<bool>,
    orphan_removal: Option<bool>,
}

impl RelationSpecBuilder {
    pub fn owning_property(mut self, name: impl Into<String>) -> Self {
        self.owning_property = Some(name.into());
        self
    }

    /// Map the inverse side under this property name.
    pub fn inverse_property(mut self, name: impl Into<String>) -> Self {
        self.inverse_property = Some(name.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn orphan_removal(mut self, orphan_removal: bool) -> Self {
        self.orphan_removal = Some(orphan_removal);
        self
    }

    pub fn build(self) -> Result<RelationSpec, DomainError> {
        let owning_property = self
            .owning_property
            .ok_or(DomainError::MissingRequiredField {
                field: "owning_property",
            })?;
        naming::validate_identifier(&owning_property)?;
        if let Some(inverse) = &self.inverse_property {
            naming::validate_identifier(inverse)?;
        }
        if self.owning_class.is_empty() || self.inverse_class.is_empty() {
            return Err(DomainError::InvalidRelation(
                "both related classes must be named".into(),
            ));
        }

        let mapped = self.inverse_property.is_some();
        let nullable = self.nullable.unwrap_or(false);
        let orphan_removal = self.orphan_removal.unwrap_or(false);

        let (shape, declared_from) = match self.kind {
            RelationKind::ManyToOne | RelationKind::OneToMany => {
                if orphan_removal && nullable {
                    return Err(DomainError::InvalidRelation(
                        "orphan removal requires a non-nullable relation".into(),
                    ));
                }
                if orphan_removal && !mapped {
                    return Err(DomainError::InvalidRelation(
                        "orphan removal requires the inverse side to be mapped".into(),
                    ));
                }
                let side = if self.kind == RelationKind::OneToMany {
                    Side::Inverse
                } else {
                    Side::Owning
                };
                (
                    RelationShape::ManyToOne {
                        nullable,
                        orphan_removal,
                    },
                    side,
                )
            }
            RelationKind::OneToOne => {
                if self.orphan_removal.is_some() {
                    return Err(DomainError::InvalidRelation(
                        "one-to-one relations do not carry orphan removal".into(),
                    ));
                }
                (RelationShape::OneToOne { nullable }, Side::Owning)
            }
            RelationKind::ManyToMany => {
                if self.nullable.is_some() || self.orphan_removal.is_some() {
                    return Err(DomainError::InvalidRelation(
                        "many-to-many relations have no nullable or orphan removal setting".into(),
                    ));
                }
                (RelationShape::ManyToMany, Side::Owning)
            }
        };

        if declared_from == Side::Inverse && !mapped {
            return Err(DomainError::InvalidRelation(format!(
                "{} relations need the collection property on {}",
                self.kind, self.inverse_class
            )));
        }

        Ok(RelationSpec {
            shape,
            declared_from,
            owning_class: self.owning_class,
            inverse_class: self.inverse_class,
            owning_property,
            inverse_property: self.inverse_property,
        })
    }
}
