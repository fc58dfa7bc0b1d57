//! Model repository trait

use async_trait::async_trait;

use super::{Model, ModelId};
use crate::domain::project::ProjectId;
use crate::domain::DomainError;

/// Repository trait for Model persistence
#[async_trait]
pub trait ModelRepository: Send + Sync + std::fmt::Debug {
    /// Get a model by ID
    async fn get(&self, id: &ModelId) -> Result<Option<Model>, DomainError>;

    /// Get all models
    async fn list(&self) -> Result<Vec<Model>, DomainError>;

    /// Get the models of a project
    async fn list_by_project(&self, project_id: &ProjectId) -> Result<Vec<Model>, DomainError>;

    /// Create a new model
    async fn create(&self, model: Model) -> Result<Model, DomainError>;

    /// Update an existing model
    async fn update(&self, model: Model) -> Result<Model, DomainError>;

    /// Delete a model by ID
    async fn delete(&self, id: &ModelId) -> Result<bool, DomainError>;

    /// Check if a model exists
    async fn exists(&self, id: &ModelId) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}

/// In-memory implementation of ModelRepository
pub mod in_memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// In-memory implementation of ModelRepository for testing and development
    #[derive(Debug, Default)]
    pub struct InMemoryModelRepository {
        models: RwLock<HashMap<String, Model>>,
    }

    impl InMemoryModelRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn lock_error() -> DomainError {
        DomainError::internal("Failed to acquire model repository lock")
    }

    #[async_trait]
    impl ModelRepository for InMemoryModelRepository {
        async fn get(&self, id: &ModelId) -> Result<Option<Model>, DomainError> {
            let models = self.models.read().map_err(|_| lock_error())?;
            Ok(models.get(id.as_str()).cloned())
        }

        async fn list(&self) -> Result<Vec<Model>, DomainError> {
            let models = self.models.read().map_err(|_| lock_error())?;
            let mut result: Vec<_> = models.values().cloned().collect();
            result.sort_by(|a, b| a.name().cmp(b.name()));
            Ok(result)
        }

        async fn list_by_project(
            &self,
            project_id: &ProjectId,
        ) -> Result<Vec<Model>, DomainError> {
            let models = self.models.read().map_err(|_| lock_error())?;
            let mut result: Vec<_> = models
                .values()
                .filter(|m| m.project_id() == Some(project_id))
                .cloned()
                .collect();
            result.sort_by(|a, b| a.name().cmp(b.name()));
            Ok(result)
        }

        async fn create(&self, model: Model) -> Result<Model, DomainError> {
            let mut models = self.models.write().map_err(|_| lock_error())?;
            let id = model.id().to_string();

            if models.contains_key(&id) {
                return Err(DomainError::conflict(format!(
                    "Model with ID '{}' already exists",
                    id
                )));
            }

            models.insert(id, model.clone());
            Ok(model)
        }

        async fn update(&self, model: Model) -> Result<Model, DomainError> {
            let mut models = self.models.write().map_err(|_| lock_error())?;
            let id = model.id().to_string();

            if !models.contains_key(&id) {
                return Err(DomainError::not_found(format!("Model '{}' not found", id)));
            }

            models.insert(id, model.clone());
            Ok(model)
        }

        async fn delete(&self, id: &ModelId) -> Result<bool, DomainError> {
            let mut models = self.models.write().map_err(|_| lock_error())?;
            Ok(models.remove(id.as_str()).is_some())
        }
    }

}
