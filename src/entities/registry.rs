use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::{EntitySchema, Tool};
use crate::error::GraphEntitiesError;
use crate::schema::SchemaDescription;
use crate::validation::Strictness;

type NormalizeFn = fn(&Value, Strictness) -> Result<Value, GraphEntitiesError>;

fn normalize<T: EntitySchema>(
    value: &Value,
    strictness: Strictness,
) -> Result<Value, GraphEntitiesError> {
    let entity = T::from_value_with(value, strictness)?;
    Ok(entity.to_value()?)
}

/// A registered entity type
#[derive(Debug, Clone, Copy)]
pub struct RegisteredEntity {
    description: SchemaDescription,
    normalize: NormalizeFn,
}

impl RegisteredEntity {
    fn of<T: EntitySchema>() -> Self {
        Self {
            description: T::describe(),
            normalize: normalize::<T>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.description.entity
    }

    pub fn description(&self) -> SchemaDescription {
        self.description
    }

    /// Validate an untyped record and return it with only the declared fields
    pub fn validate(
        &self,
        value: &Value,
        strictness: Strictness,
    ) -> Result<Value, GraphEntitiesError> {
        (self.normalize)(value, strictness)
    }
}

/// Registry of entity types, keyed by entity name
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: BTreeMap<&'static str, RegisteredEntity>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }

    /// Create a registry holding every entity type this crate defines
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<Tool>();
        registry
    }

    /// Register an entity type, replacing any type with the same name
    pub fn register<T: EntitySchema>(&mut self) {
        debug!(entity = T::ENTITY_NAME, "registering entity type");
        self.entities.insert(T::ENTITY_NAME, RegisteredEntity::of::<T>());
    }

    /// Get an entity type by name
    pub fn get(&self, name: &str) -> Option<&RegisteredEntity> {
        self.entities.get(name)
    }

    /// Get all entity types, ordered by name
    pub fn all(&self) -> Vec<&RegisteredEntity> {
        self.entities.values().collect()
    }

    /// Get entity type names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.entities.keys().copied().collect()
    }

    /// Describe an entity type by name
    pub fn describe(&self, name: &str) -> Result<SchemaDescription, GraphEntitiesError> {
        self.lookup(name).map(RegisteredEntity::description)
    }

    /// Validate an untyped record against the named entity type
    pub fn validate(
        &self,
        name: &str,
        value: &Value,
        strictness: Strictness,
    ) -> Result<Value, GraphEntitiesError> {
        self.lookup(name)?.validate(value, strictness)
    }

    fn lookup(&self, name: &str) -> Result<&RegisteredEntity, GraphEntitiesError> {
        self.get(name)
            .ok_or_else(|| GraphEntitiesError::UnknownEntity(name.to_string()))
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use crate::validation::{self, ValidationError};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct Company {
        name: String,
    }

    const COMPANY_FIELDS: [FieldDescriptor; 1] =
        [FieldDescriptor::text("name", "The company name.")];

    impl EntitySchema for Company {
        const ENTITY_NAME: &'static str = "Company";
        const INSTRUCTIONS: &'static str = "Extract companies.";
        const FIELDS: &'static [FieldDescriptor] = &COMPANY_FIELDS;

        fn from_value_with(
            value: &Value,
            strictness: Strictness,
        ) -> Result<Self, ValidationError> {
            let [name] =
                validation::validate_record(Self::ENTITY_NAME, &COMPANY_FIELDS, value, strictness)?;
            Ok(Self {
                name: name.to_string(),
            })
        }
    }

    #[test]
    fn builtin_registers_tool() {
        let registry = EntityRegistry::builtin();
        assert_eq!(registry.names(), vec!["Tool"]);
        assert_eq!(registry.describe("Tool").unwrap().fields.len(), 3);
    }

    #[test]
    fn custom_entity_types_can_be_registered() {
        let mut registry = EntityRegistry::builtin();
        registry.register::<Company>();

        assert_eq!(registry.names(), vec!["Company", "Tool"]);
        assert_eq!(registry.all().len(), 2);
        assert_eq!(registry.get("Company").unwrap().name(), "Company");
    }

    #[test]
    fn validate_normalizes_record() {
        let registry = EntityRegistry::builtin();
        let normalized = registry
            .validate(
                "Tool",
                &json!({"name": "GizmoX", "description": "A gizmo.", "category": "Hardware", "extra": true}),
                Strictness::NonEmpty,
            )
            .unwrap();

        assert_eq!(
            normalized,
            json!({"name": "GizmoX", "description": "A gizmo.", "category": "Hardware"})
        );
    }

    #[test]
    fn validate_surfaces_validation_errors() {
        let registry = EntityRegistry::builtin();
        let err = registry
            .validate("Tool", &json!({"name": "GizmoX"}), Strictness::NonEmpty)
            .unwrap_err();

        match err {
            GraphEntitiesError::Validation(err) => {
                assert_eq!(
                    err.fields().collect::<Vec<_>>(),
                    vec!["description", "category"]
                );
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn unknown_entity_is_an_error() {
        let registry = EntityRegistry::new();
        assert!(matches!(
            registry.describe("Tool"),
            Err(GraphEntitiesError::UnknownEntity(name)) if name == "Tool"
        ));
    }
}
