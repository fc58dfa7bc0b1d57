//! Built-in model type validators

mod json_schema;
mod process;

pub use json_schema::JsonSchemaValidator;
pub use process::ProcessContentValidator;

use std::sync::Arc;

use crate::domain::validation::ModelTypeRegistry;
use crate::domain::DomainError;

pub const JSON_MODEL_TYPE: &str = "json";
pub const CONNECTOR_MODEL_TYPE: &str = "connector";
pub const FORM_MODEL_TYPE: &str = "form";
pub const PROCESS_MODEL_TYPE: &str = "process";

/// Schema documents shipped with the service
pub mod schemas {
    pub const MODEL_EXTENSIONS: &str = include_str!("schemas/model-extensions.json");
    pub const JSON_CONTENT: &str = include_str!("schemas/json-content.json");
    pub const CONNECTOR_CONTENT: &str = include_str!("schemas/connector-content.json");
    pub const FORM_CONTENT: &str = include_str!("schemas/form-content.json");
}

fn schema_validator(name: &str, text: &str) -> Result<Arc<JsonSchemaValidator>, DomainError> {
    JsonSchemaValidator::from_schema_text(name, text)
        .map(Arc::new)
        .map_err(|e| DomainError::internal(format!("Failed to load schema '{}': {}", name, e)))
}

/// Registry with every model type the service supports out of the box
pub fn builtin_model_types() -> Result<ModelTypeRegistry, DomainError> {
    let extensions = schema_validator("model-extensions", schemas::MODEL_EXTENSIONS)?;

    let registry = ModelTypeRegistry::new()
        .register(
            JSON_MODEL_TYPE,
            schema_validator("json-content", schemas::JSON_CONTENT)?,
            extensions.clone(),
        )
        .register(
            CONNECTOR_MODEL_TYPE,
            schema_validator("connector-content", schemas::CONNECTOR_CONTENT)?,
            extensions.clone(),
        )
        .register(
            FORM_MODEL_TYPE,
            schema_validator("form-content", schemas::FORM_CONTENT)?,
            extensions.clone(),
        )
        .register(
            PROCESS_MODEL_TYPE,
            Arc::new(ProcessContentValidator::new()),
            extensions,
        );

    Ok(registry)
}
