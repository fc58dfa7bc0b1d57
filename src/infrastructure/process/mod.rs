//! Process infrastructure

mod in_memory;

pub use in_memory::{InMemoryProcessDefinitionRepository, InMemoryProcessInstanceRepository};
