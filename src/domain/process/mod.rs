//! Process domain - definitions and instances executed by the runtime

mod definition;
mod instance;
mod repository;
mod variables;

pub use definition::{ActivityDefinition, ActivityKind, ProcessDefinition};
pub use instance::{ProcessInstance, ProcessInstanceStatus};
pub use repository::{ProcessDefinitionRepository, ProcessInstanceRepository};
pub use variables::{convert_variables, ProcessVariables};
