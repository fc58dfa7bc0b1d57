//! Model validation domain - error model, context, schema checks and the
//! model type strategy table

mod context;
mod error;
mod json;
mod registry;
mod schema;
mod validator;

pub use context::ValidationContext;
pub use error::{ModelValidationError, ValidationError, ValidationErrorKind};
pub use json::{json_type_name, parse_json_object};
pub use registry::{ModelTypeRegistry, ModelTypeValidators};
pub use schema::{JsonSchema, SchemaError};
pub use validator::{ModelContentValidator, ModelExtensionsValidator};

#[cfg(test)]
pub use validator::{MockModelContentValidator, MockModelExtensionsValidator};
