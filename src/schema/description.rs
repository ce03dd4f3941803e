use serde::Serialize;
use serde_json::{Map, Value, json};

use super::FieldDescriptor;

/// Shape of an entity type: its name, extraction instructions and fields.
///
/// Describes the type, not an instance, so it is available before anything
/// has been extracted. Hosts feed it to prompt assembly or documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaDescription {
    /// Entity type name, e.g. `"Tool"`
    pub entity: &'static str,
    /// Entity-level instructions for the extractor
    pub instructions: &'static str,
    /// Field descriptors in declaration order
    pub fields: &'static [FieldDescriptor],
}

impl SchemaDescription {
    pub const fn new(
        entity: &'static str,
        instructions: &'static str,
        fields: &'static [FieldDescriptor],
    ) -> Self {
        Self {
            entity,
            instructions,
            fields,
        }
    }

    /// Look up a field descriptor by name
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.name).collect()
    }

    /// Render as a JSON Schema object, the form structured-output LLM APIs accept.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            properties.insert(
                field.name.to_string(),
                json!({
                    "type": field.kind.json_type(),
                    "description": field.guidance
                }),
            );
        }

        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name)
            .collect();

        json!({
            "title": self.entity,
            "description": self.instructions,
            "type": "object",
            "properties": properties,
            "required": required
        })
    }
}

/// Markdown rendering for documentation layers
impl std::fmt::Display for SchemaDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "# {}", self.entity)?;
        writeln!(f)?;
        writeln!(f, "{}", self.instructions.trim())?;
        writeln!(f)?;
        writeln!(f, "## Fields")?;
        writeln!(f)?;
        for field in self.fields {
            let required = if field.required { "required" } else { "optional" };
            writeln!(
                f,
                "- `{}` ({}, {}): {}",
                field.name, field.kind, required, field.guidance
            )?;
        }
        Ok(())
    }
}
