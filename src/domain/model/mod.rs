//! Model domain - Modeling artifacts and their persistence

mod entity;
mod repository;
mod validation;

pub use entity::{Model, ModelId};
pub use repository::{in_memory::InMemoryModelRepository, ModelRepository};
pub use validation::{
    validate_model_name, ModelNameError, MAX_MODEL_NAME_LENGTH, MODEL_NAME_PATTERN,
};
