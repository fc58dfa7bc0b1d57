//! Infrastructure services

mod model_service;
mod model_validation_service;
mod project_service;
mod runtime_service;

pub use model_service::{CreateModelRequest, ModelService};
pub use model_validation_service::{dispatch, ModelValidationService, ValidationTarget};
pub use project_service::{CreateProjectRequest, ProjectService};
pub use runtime_service::{RuntimeService, StartProcessRequest};
