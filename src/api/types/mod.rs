//! API request, response and error types

pub mod error;
pub mod json;
pub mod models;
pub mod process;

pub use error::{ApiError, ApiErrorResponse, ModelValidationBody};
pub use json::Json;
pub use models::{
    CreateModelBody, CreateProjectBody, ModelResponse, ModelTypesResponse, ModelsResponse,
    ProjectResponse,
};
pub use process::{
    AuditEventResponse, AuditEventsQuery, AuditEventsResponse, ProcessInstanceResponse,
    StartProcessBody,
};
