//! Schema-driven structural checks over JSON documents
//!
//! Schemas are compiled with `jsonschema`. Its violations are translated into
//! model validation errors in the order the validator reports them: for each
//! object the keywords run in schema order, so required keys come before the
//! declared properties, which follow the order the schema defines them.

use jsonschema::error::{TypeKind, ValidationErrorKind as SchemaViolation};
use jsonschema::primitive_type::PrimitiveType;
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use super::json::json_type_name;
use super::ValidationError;

/// Error raised when a schema document itself is malformed
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid schema: {0}")]
    Invalid(String),
}

/// Compiled schema
#[derive(Debug)]
pub struct JsonSchema {
    validator: Validator,
}

impl JsonSchema {
    /// Compile a schema from its JSON text
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Compile a schema from an already parsed document
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let validator =
            jsonschema::validator_for(value).map_err(|e| SchemaError::Invalid(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Check a document, returning every violation found
    pub fn validate(&self, instance: &Value) -> Vec<ValidationError> {
        self.validator.iter_errors(instance).map(|e| describe(&e)).collect()
    }
}

fn describe(error: &jsonschema::ValidationError<'_>) -> ValidationError {
    let pointer = format!("#{}", error.instance_path);
    let instance: &Value = &error.instance;

    let problem = match &error.kind {
        SchemaViolation::Required { property } => {
            format!("required key [{}] not found", property.as_str().unwrap_or_default())
        }
        SchemaViolation::MinLength { limit } => {
            format!("expected minLength: {}, actual: {}", limit, char_length(instance))
        }
        SchemaViolation::MaxLength { limit } => {
            format!("expected maxLength: {}, actual: {}", limit, char_length(instance))
        }
        SchemaViolation::Pattern { pattern } => format!(
            "string [{}] does not match pattern {}",
            instance.as_str().unwrap_or_default(),
            pattern
        ),
        SchemaViolation::Type { kind } => format!(
            "expected type: {}, found: {}",
            expected_type(kind),
            json_type_name(instance)
        ),
        _ => error.to_string(),
    };

    ValidationError::at(&pointer, problem)
}

fn char_length(instance: &Value) -> usize {
    instance.as_str().map(|s| s.chars().count()).unwrap_or_default()
}

fn expected_type(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(t) => type_display_name(*t).to_string(),
        TypeKind::Multiple(types) => {
            let names: Vec<&str> = (*types).into_iter().map(type_display_name).collect();
            format!("one of [{}]", names.join(", "))
        }
    }
}

/// Name used in `expected type` diagnostics
fn type_display_name(t: PrimitiveType) -> &'static str {
    match t {
        PrimitiveType::String => "String",
        PrimitiveType::Boolean => "Boolean",
        PrimitiveType::Number => "Number",
        PrimitiveType::Integer => "Integer",
        PrimitiveType::Object => "JSONObject",
        PrimitiveType::Array => "JSONArray",
        PrimitiveType::Null => "Null",
    }
}
