//! Schema Builder - the interactive loop that collects an entity's fields
//! and relations.
//!
//! Every step is a small retry loop: bad answers (unknown type, unresolvable
//! entity, invalid length...) are reported through the prompter, appended to
//! the failure log and asked again. A property name that is already taken is
//! not a bad answer but a broken invariant, and ends the session with an
//! error.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{EntityLookup, Prompter},
        services::relation_interview::RelationInterview,
    },
    domain::{
        DomainError, DomainValidator, EntitySchema, FieldDefaults, FieldSpec, FieldType, Property,
        RelationSpec, ScalarType, TargetDescriptor, grouped_types, infer_type,
    },
    error::{SmithError, SmithResult},
};

/// Answer at the type prompt that lists every type instead of selecting one.
pub const LIST_TYPES: &str = "?";

/// Accumulates properties for one target.
pub struct SchemaBuilder<'a> {
    prompter: &'a dyn Prompter,
    entities: &'a dyn EntityLookup,
    defaults: FieldDefaults,
    schema: EntitySchema,
    failures: Vec<DomainError>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(
        target: TargetDescriptor,
        prompter: &'a dyn Prompter,
        entities: &'a dyn EntityLookup,
        defaults: FieldDefaults,
    ) -> Self {
        Self {
            prompter,
            entities,
            defaults,
            schema: EntitySchema::new(target),
            failures: Vec::new(),
        }
    }

    /// Properties collected so far.
    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    /// Every validation failure seen in this session, oldest first.
    pub fn failures(&self) -> &[DomainError] {
        &self.failures
    }

    /// Ask for properties until an empty name is entered.
    #[instrument(skip_all, fields(entity = %self.schema.target().name()))]
    pub fn run(&mut self) -> SmithResult<EntitySchema> {
        while self.add_property()?.is_some() {}
        info!(
            properties = self.schema.len(),
            failures = self.failures.len(),
            "Schema complete"
        );
        Ok(self.schema.clone())
    }

    /// Run one property step. Returns `None` once the user stops.
    pub fn add_property(&mut self) -> SmithResult<Option<Property>> {
        let Some(name) = self.ask_name()? else {
            return Ok(None);
        };

        if self.schema.contains(&name) {
            return Err(DomainError::DuplicateProperty {
                name,
                entity: self.schema.target().name().to_string(),
            }
            .into());
        }

        let field_type = self.ask_type(&name)?;
        debug!(property = %name, %field_type, "Type selected");

        let property = match field_type {
            FieldType::Relation(_) => Property::Relation(self.ask_relation(field_type, &name)?),
            FieldType::Scalar(scalar) => Property::Field(self.ask_field(&name, scalar)?),
        };

        self.schema.add(property.clone())?;
        Ok(Some(property))
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn ask_name(&mut self) -> SmithResult<Option<String>> {
        let question = if self.schema.is_empty() {
            "New property name (press <return> to stop adding fields)"
        } else {
            "Add another property? Enter the property name (or press <return> to stop adding fields)"
        };

        loop {
            let answer = self.prompter.ask(question, None)?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            match DomainValidator::validate_property_name(answer) {
                Ok(()) => return Ok(Some(answer.to_string())),
                Err(e) => self.reject(e),
            }
        }
    }

    fn ask_type(&mut self, name: &str) -> SmithResult<FieldType> {
        let suggested = infer_type(name);
        loop {
            let answer = self.prompter.ask(
                &format!("Field type (enter {LIST_TYPES} to see all types)"),
                Some(suggested.as_str()),
            )?;
            let answer = answer.trim();

            if answer == LIST_TYPES {
                for line in type_listing() {
                    self.prompter.say(&line);
                }
                continue;
            }

            match answer.parse::<FieldType>() {
                Ok(ty) => return Ok(ty),
                Err(e) => self.reject(e),
            }
        }
    }

    fn ask_relation(
        &mut self,
        field_type: FieldType,
        name: &str,
    ) -> SmithResult<RelationSpec> {
        let edited = self.schema.target().clone();
        // The entity being created is not on disk yet, so the lookup
        // cannot know it.
        let mut candidates = self.entities.known_entities();
        if !candidates.iter().any(|c| c == edited.name()) {
            candidates.insert(0, edited.name().to_string());
        }

        loop {
            let answer = self.prompter.ask_with_completion(
                "What class should this entity be related to?",
                &candidates,
                None,
            )?;
            let answer = answer.trim();
            let resolved = if answer == edited.name() || answer == edited.qualified_name() {
                Some(edited.clone())
            } else {
                self.entities.resolve(answer)
            };
            let Some(target) = resolved else {
                self.reject(DomainError::EntityNotFound {
                    name: answer.to_string(),
                });
                continue;
            };

            let mut interview = RelationInterview::new(self.prompter, self.entities);
            let result = interview.run(field_type, &edited, name, &target);
            self.failures.extend(interview.into_failures());

            match result {
                Ok(spec) => return Ok(spec),
                Err(SmithError::Domain(e)) if e.is_recoverable() => self.reject(e),
                Err(e) => return Err(e),
            }
        }
    }

    fn ask_field(&mut self, name: &str, ty: ScalarType) -> SmithResult<FieldSpec> {
        let mut field = FieldSpec::new(name, ty, &self.defaults)?;

        if let Some(default) = field.length() {
            field = self.retry(|b| {
                Ok(b.ask_number("Field length", "length", default)?
                    .and_then(|length| field.clone().with_length(length)))
            })?;
        }

        if let (Some(p), Some(s)) = (field.precision(), field.scale()) {
            let precision = self.retry(|b| {
                Ok(
                    b.ask_number("Precision (total number of digits)", "precision", p)?
                        .and_then(|precision| {
                            field.clone().with_precision(precision, 0).map(|_| precision)
                        }),
                )
            })?;
            field = self.retry(|b| {
                Ok(b.ask_number("Scale (number of decimals)", "scale", s.min(precision))?
                    .and_then(|scale| field.clone().with_precision(precision, scale)))
            })?;
        }

        let nullable = self
            .prompter
            .confirm("Can this field be null in the database (nullable)?", false)?;
        Ok(field.with_nullable(nullable))
    }

    // -------------------------------------------------------------------------
    // Retry plumbing
    // -------------------------------------------------------------------------

    /// Repeat `step` until it yields a valid value. Prompt errors abort.
    fn retry<T>(
        &mut self,
        mut step: impl FnMut(&mut Self) -> SmithResult<Result<T, DomainError>>,
    ) -> SmithResult<T> {
        loop {
            match step(self)? {
                Ok(value) => return Ok(value),
                Err(e) => self.reject(e),
            }
        }
    }

    /// Ask for an integer; a malformed answer comes back as the inner error.
    fn ask_number(
        &self,
        question: &str,
        attribute: &'static str,
        default: u32,
    ) -> SmithResult<Result<u32, DomainError>> {
        let answer = self.prompter.ask(question, Some(&default.to_string()))?;
        Ok(DomainValidator::parse_attribute(attribute, &answer))
    }

    fn reject(&mut self, error: DomainError) {
        debug!(%error, "Answer rejected");
        self.prompter.say(&format!("[ERROR] {error}"));
        self.failures.push(error);
    }
}

/// Lines printed for `?`: each category title followed by its types.
pub fn type_listing() -> Vec<String> {
    let mut lines = Vec::new();
    for group in grouped_types() {
        lines.push(format!("{}:", group.category.title()));
        for entry in group.entries {
            let mut line = format!("  * {}", entry.primary);
            if !entry.variants.is_empty() {
                let variants: Vec<_> = entry.variants.iter().map(FieldType::as_str).collect();
                line.push_str(&format!(" (or {})", variants.join(", ")));
            }
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ports::MockEntityLookup, services::testing::Script};
    use crate::domain::{ModelRoot, RelationKind};

    fn root() -> ModelRoot {
        ModelRoot::new("/models", "app", "rs")
    }

    fn lookup() -> MockEntityLookup {
        let mut lookup = MockEntityLookup::new();
        lookup
            .expect_known_entities()
            .returning(|| vec!["Author".into(), "Book".into()]);
        lookup.expect_resolve().returning(|name| match name {
            "Author" | "Book" => TargetDescriptor::derive(name, &root()).ok(),
            _ => None,
        });
        lookup.expect_is_external().return_const(false);
        lookup
    }

    fn build(answers: &[&str]) -> (SmithResult<EntitySchema>, Vec<DomainError>, Script) {
        let script = Script::new(answers.iter().copied());
        let entities = lookup();
        let target = TargetDescriptor::derive("Book", &root()).unwrap();
        let mut builder = SchemaBuilder::new(target, &script, &entities, FieldDefaults::default());
        let result = builder.run();
        let failures = builder.failures().to_vec();
        (result, failures, script)
    }

    #[test]
    fn email_gets_inferred_string_with_default_length() {
        let (schema, failures, _) = build(&["email", "", "", "", ""]);
        let schema = schema.unwrap();

        let email = schema.fields().next().unwrap();
        assert_eq!(email.name(), "email");
        assert_eq!(email.ty(), ScalarType::String);
        assert_eq!(email.length(), Some(255));
        assert!(!email.nullable());
        assert!(failures.is_empty());
    }

    #[test]
    fn datetime_field_asks_no_length() {
        let (schema, _, script) = build(&["published_at", "", "", ""]);
        let schema = schema.unwrap();

        let field = schema.fields().next().unwrap();
        assert_eq!(field.ty(), ScalarType::DateTimeImmutable);
        assert_eq!(field.length(), None);
        assert!(!script.asked().iter().any(|q| q.contains("length")));
    }

    #[test]
    fn many_to_one_relation_session() {
        let (schema, _, _) = build(&["author_id", "ManyToOne", "Author", "n", "y", "books", "y", ""]);
        let schema = schema.unwrap();

        let rel = schema.relations().next().unwrap();
        assert_eq!(rel.kind(), RelationKind::ManyToOne);
        assert_eq!(rel.owning_class(), "app::Book");
        assert_eq!(rel.inverse_class(), "app::Author");
        assert_eq!(rel.owning_property(), "author_id");
        assert_eq!(rel.nullable(), Some(false));
        assert!(rel.map_inverse_relation());
        assert_eq!(rel.inverse_property(), Some("books"));
        assert!(rel.orphan_removal());
    }

    #[test]
    fn unknown_type_is_recorded_and_asked_again() {
        let (schema, failures, _) = build(&["title", "varchar", "text", "", ""]);
        let field = schema.unwrap().fields().next().cloned().unwrap();

        assert_eq!(field.ty(), ScalarType::Text);
        assert_eq!(failures.len(), 1);
        assert!(matches!(failures[0], DomainError::UnknownFieldType { .. }));
    }

    #[test]
    fn question_mark_lists_types_without_selecting() {
        let (schema, failures, script) = build(&["score", "?", "integer", "", ""]);

        assert_eq!(
            schema.unwrap().fields().next().unwrap().ty(),
            ScalarType::Integer
        );
        assert!(failures.is_empty());
        let said = script.said();
        assert!(said.contains(&"Main Types:".to_string()));
        assert!(said.contains(&"Other Types:".to_string()));
    }

    #[test]
    fn entity_being_built_is_a_relation_target() {
        let script = Script::new(["parent", "ManyToOne", "app::Category", "y", "n", ""]);
        let entities = lookup();
        let category = TargetDescriptor::derive("Category", &root()).unwrap();
        let mut builder =
            SchemaBuilder::new(category, &script, &entities, FieldDefaults::default());

        let schema = builder.run().unwrap();
        let rel = schema.relations().next().unwrap();
        assert!(rel.is_self_referencing());
        assert_eq!(rel.inverse_class(), "app::Category");
        assert!(!rel.map_inverse_relation());
        assert!(builder.failures().is_empty());
        assert_eq!(script.offered()[0], ["Category", "Author", "Book"]);
    }

    #[test]
    fn unknown_entity_is_asked_again() {
        let (schema, failures, _) = build(&["writer", "ManyToOne", "Ghost", "Author", "y", "n", ""]);

        assert!(schema.is_ok());
        assert!(matches!(failures[0], DomainError::EntityNotFound { .. }));
    }

    #[test]
    fn bad_length_is_asked_again() {
        let (schema, failures, _) = build(&["title", "", "0", "80", "", ""]);

        assert_eq!(schema.unwrap().fields().next().unwrap().length(), Some(80));
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn decimal_collects_precision_and_scale() {
        let (schema, failures, _) = build(&["price", "decimal", "70", "8", "9", "2", "", ""]);
        let field = schema.unwrap().fields().next().cloned().unwrap();

        assert_eq!((field.precision(), field.scale()), (Some(8), Some(2)));
        assert_eq!(failures.len(), 2);
    }

    #[test]
    fn duplicate_property_ends_the_session() {
        let (schema, _, _) = build(&["title", "", "", "", "title"]);
        let err = schema.unwrap_err();

        assert!(matches!(
            err,
            SmithError::Domain(DomainError::DuplicateProperty { .. })
        ));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn invalid_property_name_is_asked_again() {
        let (schema, failures, _) = build(&["first-name", "first_name", "", "", "", ""]);

        assert!(schema.unwrap().contains("first_name"));
        assert!(matches!(failures[0], DomainError::InvalidIdentifier { .. }));
    }

    #[test]
    fn listing_marks_variants() {
        let lines = type_listing();
        assert!(lines.contains(&"  * integer (or smallint, bigint)".to_string()));
    }
}
