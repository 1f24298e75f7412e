pub mod field;
pub mod relation;
pub mod render_context;
pub mod schema;
pub mod target;

pub use crate::domain::DomainError;
pub use field::{FieldDefaults, FieldSpec};
pub use relation::{RelationShape, RelationSpec, RelationSpecBuilder, Side};
pub use render_context::RenderContext;
pub use schema::{EntitySchema, Property};
pub use target::{ModelRoot, TargetDescriptor};
