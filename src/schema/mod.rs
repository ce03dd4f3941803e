mod description;

pub use description::SchemaDescription;

use serde::Serialize;

/// Value type of an entity field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form text
    Text,
}

impl FieldKind {
    /// JSON Schema type name for this kind
    pub fn json_type(self) -> &'static str {
        match self {
            Self::Text => "string",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
        }
    }
}

/// Static description of one entity field and how an extractor should fill it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDescriptor {
    /// Field name as it appears in serialized records
    pub name: &'static str,
    /// Value type
    pub kind: FieldKind,
    /// Whether construction fails without this field
    pub required: bool,
    /// Instructions for the extractor populating this field
    pub guidance: &'static str,
}

impl FieldDescriptor {
    /// A required text field
    pub const fn text(name: &'static str, guidance: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            required: true,
            guidance,
        }
    }
}
