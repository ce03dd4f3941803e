mod registry;
mod tool;

pub use registry::{EntityRegistry, RegisteredEntity};
pub use tool::Tool;

use serde::Serialize;
use serde_json::Value;

use crate::schema::{FieldDescriptor, SchemaDescription};
use crate::validation::{Strictness, ValidationError};

/// An entity type that an extractor can populate from unstructured text
pub trait EntitySchema: Serialize + Sized {
    /// Entity type name as known to the graph, e.g. `"Tool"`
    const ENTITY_NAME: &'static str;

    /// Entity-level instructions for the extractor
    const INSTRUCTIONS: &'static str;

    /// Field descriptors in declaration order
    const FIELDS: &'static [FieldDescriptor];

    /// Build an instance from an untyped record
    fn from_value_with(value: &Value, strictness: Strictness) -> Result<Self, ValidationError>;

    /// Build an instance from an untyped record with the default strictness
    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        Self::from_value_with(value, Strictness::default())
    }

    /// Describe the shape of this entity type
    fn describe() -> SchemaDescription {
        SchemaDescription::new(Self::ENTITY_NAME, Self::INSTRUCTIONS, Self::FIELDS)
    }

    /// Serialize into a record holding exactly the declared fields
    fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
