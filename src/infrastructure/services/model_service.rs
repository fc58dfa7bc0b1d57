//! Model service - creation and validated uploads of modeling artifacts

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use super::ModelValidationService;
use crate::domain::model::{validate_model_name, Model, ModelId, ModelRepository};
use crate::domain::project::{ProjectId, ProjectRepository};
use crate::domain::DomainError;

/// Request to create a new model
#[derive(Debug, Clone)]
pub struct CreateModelRequest {
    pub name: String,
    pub model_type: String,
    pub project_id: Option<String>,
}

/// Model service for creating models and persisting validated uploads
pub struct ModelService {
    models: Arc<dyn ModelRepository>,
    projects: Arc<dyn ProjectRepository>,
    validation: Arc<ModelValidationService>,
}

impl ModelService {
    pub fn new(
        models: Arc<dyn ModelRepository>,
        projects: Arc<dyn ProjectRepository>,
        validation: Arc<ModelValidationService>,
    ) -> Self {
        Self {
            models,
            projects,
            validation,
        }
    }

    /// Get a model by ID, returning an error if not found
    pub async fn get(&self, id: &str) -> Result<Model, DomainError> {
        self.models
            .get(&ModelId::new(id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Model '{}' not found", id)))
    }

    /// List models, optionally restricted to one project
    pub async fn list(&self, project_id: Option<&str>) -> Result<Vec<Model>, DomainError> {
        let mut models = match project_id {
            Some(id) => self.models.list_by_project(&ProjectId::new(id)).await?,
            None => self.models.list().await?,
        };
        models.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(models)
    }

    /// Create a new model
    pub async fn create(&self, request: CreateModelRequest) -> Result<Model, DomainError> {
        validate_model_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;

        if !self.validation.registry().contains(&request.model_type) {
            return Err(DomainError::validation(format!(
                "Unknown model type '{}'",
                request.model_type
            )));
        }

        let mut model = Model::new(ModelId::generate(), request.name, request.model_type);

        if let Some(project_id) = request.project_id {
            let project_id = ProjectId::new(project_id);

            if self.projects.get(&project_id).await?.is_none() {
                return Err(DomainError::not_found(format!(
                    "Project '{}' not found",
                    project_id
                )));
            }

            let siblings = self.models.list_by_project(&project_id).await?;
            if siblings.iter().any(|m| m.name() == model.name()) {
                return Err(DomainError::conflict(format!(
                    "Model '{}' already exists in project '{}'",
                    model.name(),
                    project_id
                )));
            }

            model = model.with_project(project_id);
        }

        let model = self.models.create(model).await?;

        info!(
            model_id = %model.id(),
            model_type = %model.model_type(),
            "Model created"
        );

        Ok(model)
    }

    /// Validate new content and store it; nothing is written when invalid
    pub async fn upload_content(&self, id: &str, content: Vec<u8>) -> Result<Model, DomainError> {
        self.validation.validate_content(id, &content).await?;

        let mut model = self.get(id).await?;
        model.set_content(content);

        let model = self.models.update(model).await?;
        info!(model_id = %id, version = model.version(), "Model content updated");
        Ok(model)
    }

    /// Validate a new extensions document and store it; nothing is written
    /// when invalid
    pub async fn upload_extensions(
        &self,
        id: &str,
        content: Vec<u8>,
    ) -> Result<Model, DomainError> {
        self.validation.validate_extensions(id, &content).await?;

        let extensions: Value = serde_json::from_slice(&content)
            .map_err(|e| DomainError::internal(format!("Validated extensions unreadable: {}", e)))?;

        let mut model = self.get(id).await?;
        model.set_extensions(extensions);

        let model = self.models.update(model).await?;
        info!(model_id = %id, version = model.version(), "Model extensions updated");
        Ok(model)
    }
}
