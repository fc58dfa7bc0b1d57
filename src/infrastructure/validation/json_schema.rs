//! Schema-backed validators for JSON model content and extensions

use serde_json::Value;
use tracing::debug;

use crate::domain::validation::{
    parse_json_object, JsonSchema, ModelContentValidator, ModelExtensionsValidator,
    ModelValidationError, SchemaError, ValidationContext,
};

/// Validates JSON documents against a compiled schema.
///
/// Registered as content validator, extensions validator, or both, depending
/// on the schema it was built with.
#[derive(Debug)]
pub struct JsonSchemaValidator {
    name: String,
    schema: JsonSchema,
}

impl JsonSchemaValidator {
    pub fn new(name: impl Into<String>, schema: JsonSchema) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }

    /// Build from schema JSON text
    pub fn from_schema_text(name: impl Into<String>, text: &str) -> Result<Self, SchemaError> {
        Ok(Self::new(name, JsonSchema::parse(text)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn validate_json(&self, content: &[u8], context: &ValidationContext) -> Result<(), ModelValidationError> {
        let document = Value::Object(parse_json_object(content)?);
        let errors = self.schema.validate(&document);

        debug!(
            validator = %self.name,
            model_type = %context.model_type(),
            violations = errors.len(),
            "Schema validation finished"
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ModelValidationError::semantic(errors))
        }
    }
}

impl ModelContentValidator for JsonSchemaValidator {
    fn validate_model_content(
        &self,
        content: &[u8],
        context: &ValidationContext,
    ) -> Result<(), ModelValidationError> {
        self.validate_json(content, context)
    }
}

impl ModelExtensionsValidator for JsonSchemaValidator {
    fn validate_model_extensions(
        &self,
        content: &[u8],
        context: &ValidationContext,
    ) -> Result<(), ModelValidationError> {
        self.validate_json(content, context)
    }
}
