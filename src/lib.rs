//! Entity schemas for LLM-driven knowledge-graph extraction.
//!
//! Each entity type declares its fields, the guidance an extractor should
//! follow when populating them, and validating constructors that refuse to
//! build an instance with a missing or mistyped field.

pub mod config;
pub mod entities;
pub mod error;
pub mod schema;
pub mod validation;

pub use config::{ProjectConfig, ValidationConfig};
pub use entities::{EntityRegistry, EntitySchema, RegisteredEntity, Tool};
pub use error::GraphEntitiesError;
pub use schema::{FieldDescriptor, FieldKind, SchemaDescription};
pub use validation::{FieldIssue, IssueKind, Strictness, ValidationError};
