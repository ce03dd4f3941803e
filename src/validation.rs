use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

use crate::error::GraphEntitiesError;
use crate::schema::{FieldDescriptor, FieldKind};

/// How strictly text fields are checked at construction.
///
/// Presence and text type are always enforced. `NonEmpty` additionally
/// rejects the empty string; `NonBlank` also rejects whitespace-only text.
///
/// Config files use `non_empty` and the CLI flag uses `non-empty`. Config
/// files and the environment accept either spelling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Reject empty values
    #[default]
    #[serde(alias = "non-empty")]
    NonEmpty,
    /// Reject empty and whitespace-only values
    #[serde(alias = "non-blank")]
    NonBlank,
    /// Only require that the field is present and is text
    #[serde(alias = "presence-only")]
    PresenceOnly,
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonEmpty => write!(f, "non_empty"),
            Self::NonBlank => write!(f, "non_blank"),
            Self::PresenceOnly => write!(f, "presence_only"),
        }
    }
}

impl FromStr for Strictness {
    type Err = GraphEntitiesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(&s.replace('_', "-"), true).map_err(|_| {
            GraphEntitiesError::Config(format!(
                "unknown strictness: {} (expected non_empty, non_blank or presence_only)",
                s
            ))
        })
    }
}

/// Why a single field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    /// The field was not supplied
    Missing,
    /// The field was supplied but is not text
    WrongType { found: &'static str },
    /// The field is the empty string
    Empty,
    /// The field holds only whitespace
    Blank,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::WrongType { found } => write!(f, "expected text, found {}", found),
            Self::Empty => write!(f, "empty"),
            Self::Blank => write!(f, "blank"),
        }
    }
}

/// A failing field and the reason it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Construction of an entity failed.
///
/// Carries every failing field, in declaration order, never just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("invalid {entity}: {}", join_issues(.issues))]
pub struct ValidationError {
    pub entity: &'static str,
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Names of the failing fields
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.issues.iter().map(|issue| issue.field)
    }

    /// The issue reported for `field`, if it failed
    pub fn issue_for(&self, field: &str) -> Option<&IssueKind> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| &issue.kind)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_text(text: &str, strictness: Strictness) -> Option<IssueKind> {
    match strictness {
        Strictness::NonEmpty | Strictness::NonBlank if text.is_empty() => Some(IssueKind::Empty),
        Strictness::NonBlank if text.trim().is_empty() => Some(IssueKind::Blank),
        _ => None,
    }
}

fn check_value(
    field: &FieldDescriptor,
    value: Option<&Value>,
    strictness: Strictness,
) -> Option<IssueKind> {
    match (field.kind, value) {
        (_, None) if field.required => Some(IssueKind::Missing),
        (_, None) => None,
        (FieldKind::Text, Some(Value::String(text))) => check_text(text, strictness),
        (FieldKind::Text, Some(other)) => Some(IssueKind::WrongType {
            found: json_type_name(other),
        }),
    }
}

fn finish(entity: &'static str, issues: Vec<FieldIssue>) -> Result<(), ValidationError> {
    if issues.is_empty() {
        return Ok(());
    }
    let error = ValidationError { entity, issues };
    debug!(error = %error, "entity validation failed");
    Err(error)
}

/// Check already-typed text values against their field descriptors.
pub fn check_values<const N: usize>(
    entity: &'static str,
    fields: &[FieldDescriptor; N],
    values: [&str; N],
    strictness: Strictness,
) -> Result<(), ValidationError> {
    let issues = fields
        .iter()
        .zip(values)
        .filter_map(|(field, value)| {
            check_text(value, strictness).map(|kind| FieldIssue {
                field: field.name,
                kind,
            })
        })
        .collect();
    finish(entity, issues)
}

/// Validate an untyped record against the given fields, returning the field
/// values in declaration order.
///
/// Keys not named by `fields` are ignored. A record that is not an object
/// has none of its fields present.
pub fn validate_record<'a, const N: usize>(
    entity: &'static str,
    fields: &[FieldDescriptor; N],
    record: &'a Value,
    strictness: Strictness,
) -> Result<[&'a str; N], ValidationError> {
    let object = record.as_object();
    if object.is_none() {
        debug!(entity, found = json_type_name(record), "record is not an object");
    }

    if let Some(object) = object {
        for key in object.keys() {
            if !fields.iter().any(|field| field.name == key.as_str()) {
                debug!(entity, key = %key, "ignoring unknown field");
            }
        }
    }

    let lookup = |name: &str| object.and_then(|object| object.get(name));

    let issues = fields
        .iter()
        .filter_map(|field| {
            check_value(field, lookup(field.name), strictness).map(|kind| FieldIssue {
                field: field.name,
                kind,
            })
        })
        .collect();
    finish(entity, issues)?;

    Ok(fields.map(|field| lookup(field.name).and_then(Value::as_str).unwrap_or_default()))
}
