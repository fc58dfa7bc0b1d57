//! Project service

use std::sync::Arc;

use tracing::info;

use crate::domain::model::validate_model_name;
use crate::domain::project::{Project, ProjectId, ProjectRepository};
use crate::domain::DomainError;

/// Request to create a new project
#[derive(Debug, Clone)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
}

pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn get(&self, id: &str) -> Result<Project, DomainError> {
        self.projects
            .get(&ProjectId::new(id))
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Project '{}' not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Project>, DomainError> {
        self.projects.list().await
    }

    /// Create a project; names follow the model name rules and are unique
    pub async fn create(&self, request: CreateProjectRequest) -> Result<Project, DomainError> {
        validate_model_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;

        let mut project = Project::new(ProjectId::generate(), request.name);
        if let Some(description) = request.description {
            project = project.with_description(description);
        }

        let project = self.projects.create(project).await?;
        info!(project_id = %project.id(), name = %project.name(), "Project created");
        Ok(project)
    }
}
