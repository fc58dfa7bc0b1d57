//! In-memory process repositories

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::process::{
    ProcessDefinition, ProcessDefinitionRepository, ProcessInstance, ProcessInstanceRepository,
};
use crate::domain::DomainError;

/// In-memory implementation of ProcessDefinitionRepository
pub struct InMemoryProcessDefinitionRepository {
    definitions: RwLock<Vec<ProcessDefinition>>,
}

impl InMemoryProcessDefinitionRepository {
    pub fn new() -> Self {
        Self {
            definitions: RwLock::new(Vec::new()),
        }
    }

    /// Repository preloaded with the definitions deployed at startup
    pub fn with_builtin_definitions() -> Self {
        Self {
            definitions: RwLock::new(vec![
                ProcessDefinition::simple_process(),
                ProcessDefinition::rollback_process(),
                ProcessDefinition::error_handling_process(),
            ]),
        }
    }

    /// Deploy a definition, replacing an identical key and version
    pub fn deploy(&self, definition: ProcessDefinition) -> Result<(), DomainError> {
        let mut definitions = self
            .definitions
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        definitions.retain(|d| d.id() != definition.id());
        definitions.push(definition);
        Ok(())
    }
}

impl Default for InMemoryProcessDefinitionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessDefinitionRepository for InMemoryProcessDefinitionRepository {
    async fn find_latest_by_key(
        &self,
        key: &str,
    ) -> Result<Option<ProcessDefinition>, DomainError> {
        let definitions = self
            .definitions
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(definitions
            .iter()
            .filter(|d| d.key() == key)
            .max_by_key(|d| d.version())
            .cloned())
    }

    async fn list(&self) -> Result<Vec<ProcessDefinition>, DomainError> {
        let definitions = self
            .definitions
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(definitions.clone())
    }
}

/// In-memory implementation of ProcessInstanceRepository
pub struct InMemoryProcessInstanceRepository {
    instances: RwLock<HashMap<String, ProcessInstance>>,
}

impl InMemoryProcessInstanceRepository {
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProcessInstanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessInstanceRepository for InMemoryProcessInstanceRepository {
    async fn get(&self, id: &str) -> Result<Option<ProcessInstance>, DomainError> {
        let instances = self
            .instances
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(instances.get(id).cloned())
    }

    async fn find_by_definition_key(
        &self,
        key: &str,
    ) -> Result<Vec<ProcessInstance>, DomainError> {
        let instances = self
            .instances
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let mut found: Vec<ProcessInstance> = instances
            .values()
            .filter(|i| i.definition_key() == key)
            .cloned()
            .collect();
        found.sort_by_key(|i| i.started_at());
        Ok(found)
    }

    async fn save(&self, instance: ProcessInstance) -> Result<ProcessInstance, DomainError> {
        let mut instances = self
            .instances
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        instances.insert(instance.id().to_string(), instance.clone());
        Ok(instance)
    }
}
