//! Process repositories

use async_trait::async_trait;

use super::{ProcessDefinition, ProcessInstance};
use crate::domain::DomainError;

/// Deployed process definitions
#[async_trait]
pub trait ProcessDefinitionRepository: Send + Sync {
    /// Latest version of the definition with the given key
    async fn find_latest_by_key(&self, key: &str)
        -> Result<Option<ProcessDefinition>, DomainError>;

    async fn list(&self) -> Result<Vec<ProcessDefinition>, DomainError>;
}

/// Durable process instances
#[async_trait]
pub trait ProcessInstanceRepository: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<ProcessInstance>, DomainError>;

    async fn find_by_definition_key(
        &self,
        key: &str,
    ) -> Result<Vec<ProcessInstance>, DomainError>;

    async fn save(&self, instance: ProcessInstance) -> Result<ProcessInstance, DomainError>;
}
