//! `EntitySchema`: the ordered set of properties collected for one target.
//!
//! Fields and relations share one name space; a second property with the
//! same name is an invariant violation, not a validation failure.

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{field::FieldSpec, relation::RelationSpec, target::TargetDescriptor},
    error::DomainError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Property {
    Field(FieldSpec),
    Relation(RelationSpec),
}

impl Property {
    /// Name of the property on the entity being edited.
    pub fn name(&self) -> &str {
        match self {
            Self::Field(f) => f.name(),
            Self::Relation(r) => r.local_property(),
        }
    }
}

impl From<FieldSpec> for Property {
    fn from(f: FieldSpec) -> Self {
        Self::Field(f)
    }
}

impl From<RelationSpec> for Property {
    fn from(r: RelationSpec) -> Self {
        Self::Relation(r)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    target: TargetDescriptor,
    properties: Vec<Property>,
}

impl EntitySchema {
    pub fn new(target: TargetDescriptor) -> Self {
        Self {
            target,
            properties: Vec::new(),
        }
    }

    pub fn target(&self) -> &TargetDescriptor {
        &self.target
    }

    /// Append a property, rejecting a name already in use.
    pub fn add(&mut self, property: impl Into<Property>) -> Result<(), DomainError> {
        let property = property.into();
        if self.contains(property.name()) {
            return Err(DomainError::DuplicateProperty {
                name: property.name().to_string(),
                entity: self.target.name().to_string(),
            });
        }
        self.properties.push(property);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name() == name)
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.properties.iter().filter_map(|p| match p {
            Property::Field(f) => Some(f),
            Property::Relation(_) => None,
        })
    }

    pub fn relations(&self) -> impl Iterator<Item = &RelationSpec> {
        self.properties.iter().filter_map(|p| match p {
            Property::Relation(r) => Some(r),
            Property::Field(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{field::FieldDefaults, target::ModelRoot},
        value_objects::{RelationKind, ScalarType},
    };

    fn schema() -> EntitySchema {
        EntitySchema::new(TargetDescriptor::derive("Book", &ModelRoot::default()).unwrap())
    }

    fn field(name: &str) -> FieldSpec {
        FieldSpec::new(name, ScalarType::String, &FieldDefaults::default()).unwrap()
    }

    #[test]
    fn keeps_insertion_order() {
        let mut s = schema();
        s.add(field("title")).unwrap();
        s.add(field("isbn")).unwrap();
        let names: Vec<_> = s.properties().iter().map(Property::name).collect();
        assert_eq!(names, ["title", "isbn"]);
    }

    #[test]
    fn duplicate_field_is_an_invariant_violation() {
        let mut s = schema();
        s.add(field("title")).unwrap();
        let err = s.add(field("title")).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateProperty { .. }));
        assert!(!err.is_recoverable());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn relations_share_the_name_space() {
        let mut s = schema();
        s.add(field("author")).unwrap();
        let rel = RelationSpec::builder(RelationKind::ManyToOne, "Book", "Author")
            .owning_property("author")
            .build()
            .unwrap();
        assert!(s.add(rel).is_err());
        assert_eq!(s.relations().count(), 0);
        assert_eq!(s.fields().count(), 1);
    }
}
