//! Structural contract for question records, compiled with `jsonschema`.
//!
//! The schema ships in `schema/question_record.schema.json` and is embedded at
//! build time. It covers presence, JSON types, the difficulty enum, minimum
//! collection sizes and closed key sets. Schema errors are translated into
//! `Violation`s keyed by dotted field path.

use crate::validation::{Violation, ViolationKind};
use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use jsonschema::error::ValidationErrorKind;
use serde_json::Value;

/// Version marker carried in the schema's `title`.
pub const RECORD_SCHEMA_TITLE: &str = "question_record";

const EMBEDDED_SCHEMA: &str = include_str!("../../schema/question_record.schema.json");

pub struct RecordSchema {
    compiled: JSONSchema,
}

impl RecordSchema {
    /// Compile the schema bundled with the crate.
    pub fn embedded() -> Result<Self> {
        let value: Value =
            serde_json::from_str(EMBEDDED_SCHEMA).context("parsing embedded record schema")?;
        Self::from_value(&value)
    }

    pub fn from_value(schema: &Value) -> Result<Self> {
        let title = schema.get("title").and_then(Value::as_str);
        if title != Some(RECORD_SCHEMA_TITLE) {
            bail!(
                "record schema title {:?} does not match {}",
                title,
                RECORD_SCHEMA_TITLE
            );
        }
        let compiled = JSONSchema::compile(schema)
            .map_err(|err| anyhow!("compiling record schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// Every structural violation in `instance`, in the order the schema
    /// reports them.
    pub fn violations(&self, instance: &Value) -> Vec<Violation> {
        let errors = match self.compiled.validate(instance) {
            Ok(()) => return Vec::new(),
            Err(errors) => errors,
        };
        errors
            .map(|err| {
                let pointer = err.instance_path.to_string();
                let message = err.to_string();
                translate(&pointer, err.kind, message)
            })
            .collect()
    }
}

fn translate(pointer: &str, kind: ValidationErrorKind, message: String) -> Violation {
    let (mut field, index) = field_path(pointer);
    let kind = match kind {
        ValidationErrorKind::Required { property } => {
            if let Some(name) = property.as_str() {
                field = join(&field, name);
            }
            ViolationKind::MissingOrWrongType
        }
        ValidationErrorKind::Enum { .. } => ViolationKind::InvalidEnum,
        ValidationErrorKind::MinItems { .. } => ViolationKind::EmptyCollection,
        ValidationErrorKind::AdditionalProperties { .. } => ViolationKind::UnexpectedKey,
        _ => ViolationKind::MissingOrWrongType,
    };
    if field.is_empty() {
        field = "record".to_string();
    }
    let violation = Violation::new(field, kind, message);
    match index {
        Some(index) => violation.at(index),
        None => violation,
    }
}

/// Split a JSON pointer into a dotted field path and the innermost array
/// position: `/architecture/components/2/name` becomes
/// (`architecture.components.name`, `Some(2)`).
pub(crate) fn field_path(pointer: &str) -> (String, Option<usize>) {
    let mut parts: Vec<&str> = Vec::new();
    let mut index = None;
    for segment in pointer.split('/').filter(|s| !s.is_empty()) {
        match segment.parse::<usize>() {
            Ok(position) => index = Some(position),
            Err(_) => parts.push(segment),
        }
    }
    (parts.join("."), index)
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
