//! Domain layer - entities, seams and rules independent of transport

pub mod audit;
pub mod command;
pub mod error;
pub mod model;
pub mod process;
pub mod project;
pub mod validation;

pub use audit::{AuditEvent, AuditEventType, PublishError};
pub use command::{CommandContext, CommandContextCloseListener, CommandExecutor};
pub use error::DomainError;
pub use model::{Model, ModelId, ModelRepository};
pub use process::{ProcessDefinition, ProcessInstance};
pub use project::{Project, ProjectId, ProjectRepository};
pub use validation::{
    ModelContentValidator, ModelExtensionsValidator, ModelTypeRegistry, ModelValidationError,
    ValidationContext, ValidationError,
};
