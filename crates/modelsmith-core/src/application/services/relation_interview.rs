//! Relation Interview - asks the per-kind questions that turn a relation
//! field into a `RelationSpec`.
//!
//! Each kind has its own fixed question sequence because the defaults are
//! asymmetric: the many side always holds the key, one-to-one is
//! unidirectional unless asked otherwise, and orphan removal only means
//! something for a non-nullable relation whose inverse side is mapped.
//!
//! ```text
//! ManyToOne   nullable? → map inverse? → inverse name → orphan removal?
//! OneToMany   owning field name → nullable? → orphan removal?
//! ManyToMany  map inverse? → inverse name
//! OneToOne    nullable? → map inverse? → inverse name
//! ```
//!
//! External entities cannot be edited, so "map inverse?" is answered `no`
//! for them without asking.

use tracing::{debug, instrument};

use crate::{
    application::ports::{EntityLookup, Prompter},
    domain::{
        DomainError, DomainValidator, FieldType, RelationKind, RelationSpec, TargetDescriptor,
        naming,
    },
    error::SmithResult,
};

/// Runs one relation's question sequence.
///
/// Invalid property-name answers are reported through the prompter, recorded
/// in [`failures`](Self::failures) and asked again.
pub struct RelationInterview<'a> {
    prompter: &'a dyn Prompter,
    entities: &'a dyn EntityLookup,
    failures: Vec<DomainError>,
}

impl<'a> RelationInterview<'a> {
    pub fn new(prompter: &'a dyn Prompter, entities: &'a dyn EntityLookup) -> Self {
        Self {
            prompter,
            entities,
            failures: Vec::new(),
        }
    }

    /// Validation failures recorded so far.
    pub fn failures(&self) -> &[DomainError] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<DomainError> {
        self.failures
    }

    /// Interview the user about `field_name` on `edited`, a relation of type
    /// `field_type` pointing at `target`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedRelationType` if `field_type` is a scalar type
    /// - `ExternalEntity` for a one-to-many onto an external entity, which
    ///   would need a key column on a class this project cannot edit
    #[instrument(skip_all, fields(entity = %edited.name(), field = %field_name, target = %target))]
    pub fn run(
        &mut self,
        field_type: FieldType,
        edited: &TargetDescriptor,
        field_name: &str,
        target: &TargetDescriptor,
    ) -> SmithResult<RelationSpec> {
        let FieldType::Relation(kind) = field_type else {
            return Err(DomainError::UnsupportedRelationType {
                given: field_type.to_string(),
            }
            .into());
        };
        debug!(%kind, "Starting relation interview");

        match kind {
            RelationKind::ManyToOne => self.many_to_one(edited, field_name, target),
            RelationKind::OneToMany => self.one_to_many(edited, field_name, target),
            RelationKind::ManyToMany => self.many_to_many(edited, field_name, target),
            RelationKind::OneToOne => self.one_to_one(edited, field_name, target),
        }
    }

    fn many_to_one(
        &mut self,
        owning: &TargetDescriptor,
        field_name: &str,
        inverse: &TargetDescriptor,
    ) -> SmithResult<RelationSpec> {
        let nullable = self.ask_nullable(owning, field_name)?;
        let mut builder = RelationSpec::builder(
            RelationKind::ManyToOne,
            owning.qualified_name(),
            inverse.qualified_name(),
        )
        .owning_property(field_name)
        .nullable(nullable);

        if self.decide_mapping(owning, inverse, true)? {
            let inverse_property =
                self.ask_property(inverse, &naming::collection_property(owning.name()))?;
            builder = builder.inverse_property(inverse_property);

            if !nullable {
                builder = builder.orphan_removal(self.ask_orphan_removal(owning, inverse)?);
            }
        }

        Ok(builder.build()?)
    }

    fn one_to_many(
        &mut self,
        edited: &TargetDescriptor,
        field_name: &str,
        target: &TargetDescriptor,
    ) -> SmithResult<RelationSpec> {
        // The target holds the key, so it must be editable.
        if self.entities.is_external(&target.qualified_name()) {
            return Err(DomainError::ExternalEntity {
                entity: target.qualified_name(),
                reason: "a one-to-many needs a new field on the related entity".into(),
            }
            .into());
        }

        self.prompter.say(&format!(
            "A new property will also be added to the {} class so that you can access and set the related {} object from it.",
            target.name(),
            edited.name()
        ));
        let owning_property =
            self.ask_property(target, &naming::reference_property(edited.name()))?;
        let nullable = self.ask_nullable(target, &owning_property)?;

        let mut builder = RelationSpec::builder(
            RelationKind::OneToMany,
            target.qualified_name(),
            edited.qualified_name(),
        )
        .owning_property(owning_property)
        .inverse_property(field_name)
        .nullable(nullable);

        if !nullable {
            builder = builder.orphan_removal(self.ask_orphan_removal(target, edited)?);
        }

        Ok(builder.build()?)
    }

    fn many_to_many(
        &mut self,
        owning: &TargetDescriptor,
        field_name: &str,
        inverse: &TargetDescriptor,
    ) -> SmithResult<RelationSpec> {
        let mut builder = RelationSpec::builder(
            RelationKind::ManyToMany,
            owning.qualified_name(),
            inverse.qualified_name(),
        )
        .owning_property(field_name);

        if self.decide_mapping(owning, inverse, true)? {
            let inverse_property =
                self.ask_property(inverse, &naming::collection_property(owning.name()))?;
            builder = builder.inverse_property(inverse_property);
        }

        Ok(builder.build()?)
    }

    fn one_to_one(
        &mut self,
        owning: &TargetDescriptor,
        field_name: &str,
        inverse: &TargetDescriptor,
    ) -> SmithResult<RelationSpec> {
        let nullable = self.ask_nullable(owning, field_name)?;
        let mut builder = RelationSpec::builder(
            RelationKind::OneToOne,
            owning.qualified_name(),
            inverse.qualified_name(),
        )
        .owning_property(field_name)
        .nullable(nullable);

        if self.decide_mapping(owning, inverse, false)? {
            // Named after the owning entity (`User.profile` ↔ `Profile.user`).
            let inverse_property =
                self.ask_property(inverse, &naming::reference_property(owning.name()))?;
            builder = builder.inverse_property(inverse_property);
        }

        Ok(builder.build()?)
    }

    // -------------------------------------------------------------------------
    // Questions
    // -------------------------------------------------------------------------

    fn ask_nullable(&self, entity: &TargetDescriptor, property: &str) -> SmithResult<bool> {
        self.prompter.confirm(
            &format!(
                "Is the {}.{property} property allowed to be null (nullable)?",
                entity.name()
            ),
            true,
        )
    }

    /// Whether to generate the back-reference on `inverse`. Never asked for
    /// external entities.
    fn decide_mapping(
        &self,
        owning: &TargetDescriptor,
        inverse: &TargetDescriptor,
        recommended: bool,
    ) -> SmithResult<bool> {
        if self.entities.is_external(&inverse.qualified_name()) {
            debug!(inverse = %inverse, "Inverse entity is external; not mapping");
            return Ok(false);
        }
        self.prompter.confirm(
            &format!(
                "Do you want to add a new property to {} so that you can access/update {} objects from it?",
                inverse.name(),
                owning.name()
            ),
            recommended,
        )
    }

    fn ask_orphan_removal(
        &self,
        owning: &TargetDescriptor,
        inverse: &TargetDescriptor,
    ) -> SmithResult<bool> {
        self.prompter.confirm(
            &format!(
                "Do you want to automatically delete orphaned {} objects (orphan removal)? Removing a {} from its {} would delete it.",
                owning.qualified_name(),
                owning.name(),
                inverse.name()
            ),
            false,
        )
    }

    /// Ask for a property name on `entity` until a valid identifier is given.
    fn ask_property(&mut self, entity: &TargetDescriptor, default: &str) -> SmithResult<String> {
        let question = format!("New field name inside {}", entity.name());
        loop {
            let answer = self.prompter.ask(&question, Some(default))?;
            let answer = answer.trim();
            match DomainValidator::validate_property_name(answer) {
                Ok(()) => return Ok(answer.to_string()),
                Err(e) => {
                    self.prompter.say(&e.to_string());
                    self.failures.push(e);
                }
            }
        }
    }
}
