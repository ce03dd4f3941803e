use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EntitySchema;
use crate::error::GraphEntitiesError;
use crate::schema::FieldDescriptor;
use crate::validation::{self, Strictness, ValidationError};

const INSTRUCTIONS: &str = r#"**AI Persona:** You are an expert entity extraction assistant.

**Task:** Identify and extract information about Tool entities mentioned in the provided text context.
A Tool represents a specific good or service that a company offers.

**Context:** The user will provide text containing potential mentions of products.

**Extraction Instructions:**
Your goal is to accurately populate the fields (`name`, `description`, `category`)
based *only* on information explicitly or implicitly stated in the text.

1.  **Identify Core Mentions:** Look for explicit mentions of commercial goods or services.
2.  **Extract Name:** Identify Tool names, especially proper nouns, capitalized words, or terms near trademark symbols (™, ®).
3.  **Extract Description:** Synthesize a concise description using details about features, purpose, pricing, or availability found *only* in the text.
4.  **Extract Category:** Determine the product category (e.g., "Software", "Hardware", "Service") based on the description or explicit mentions.
5.  **Refine Details:** Pay attention to specifications, technical details, stated benefits, unique selling points, variations, or models mentioned, and incorporate relevant details into the description.
6.  **Handle Ambiguity:** If information for a field is missing or unclear in the text, indicate that rather than making assumptions.

**Output Format:** Respond with the extracted data structured according to this schema."#;

const TOOL_FIELDS: [FieldDescriptor; 3] = [
    FieldDescriptor::text(
        "name",
        "The specific name of the product as mentioned in the text.",
    ),
    FieldDescriptor::text(
        "description",
        "A concise description of the Tool, synthesized *only* from information present in the provided text context.",
    ),
    FieldDescriptor::text(
        "category",
        "The category the Tool belongs to (e.g., \"Electronics\", \"Software\", \"Service\") based on the text.",
    ),
];

/// A specific good or service that a company offers, as extracted from text.
///
/// Instances are only obtainable through validating constructors and are
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Tool {
    name: String,
    description: String,
    category: String,
}

impl Tool {
    /// Create a tool, rejecting empty fields
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new_with(name, description, category, Strictness::default())
    }

    /// Create a tool with an explicit strictness
    pub fn new_with(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        strictness: Strictness,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let description = description.into();
        let category = category.into();

        validation::check_values(
            Self::ENTITY_NAME,
            &TOOL_FIELDS,
            [name.as_str(), description.as_str(), category.as_str()],
            strictness,
        )?;

        Ok(Self {
            name,
            description,
            category,
        })
    }

    /// Parse and validate a JSON record
    pub fn from_json_str(json: &str) -> Result<Self, GraphEntitiesError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Take ownership of `(name, description, category)`
    pub fn into_parts(self) -> (String, String, String) {
        (self.name, self.description, self.category)
    }
}

impl EntitySchema for Tool {
    const ENTITY_NAME: &'static str = "Tool";
    const INSTRUCTIONS: &'static str = INSTRUCTIONS;
    const FIELDS: &'static [FieldDescriptor] = &TOOL_FIELDS;

    fn from_value_with(value: &Value, strictness: Strictness) -> Result<Self, ValidationError> {
        let [name, description, category] =
            validation::validate_record(Self::ENTITY_NAME, &TOOL_FIELDS, value, strictness)?;

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
        })
    }
}

impl TryFrom<Value> for Tool {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}
