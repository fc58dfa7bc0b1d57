//! Project repository trait

use async_trait::async_trait;

use super::{Project, ProjectId};
use crate::domain::DomainError;

/// Repository trait for Project persistence
#[async_trait]
pub trait ProjectRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Project>, DomainError>;

    async fn list(&self) -> Result<Vec<Project>, DomainError>;

    async fn create(&self, project: Project) -> Result<Project, DomainError>;
}

/// In-memory implementation of ProjectRepository
pub mod in_memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Debug, Default)]
    pub struct InMemoryProjectRepository {
        projects: RwLock<HashMap<String, Project>>,
    }

    impl InMemoryProjectRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn lock_error() -> DomainError {
        DomainError::internal("Failed to acquire project repository lock")
    }

    #[async_trait]
    impl ProjectRepository for InMemoryProjectRepository {
        async fn get(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
            let projects = self.projects.read().map_err(|_| lock_error())?;
            Ok(projects.get(id.as_str()).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Project>, DomainError> {
            let projects = self.projects.read().map_err(|_| lock_error())?;
            Ok(projects.values().find(|p| p.name() == name).cloned())
        }

        async fn list(&self) -> Result<Vec<Project>, DomainError> {
            let projects = self.projects.read().map_err(|_| lock_error())?;
            let mut result: Vec<_> = projects.values().cloned().collect();
            result.sort_by(|a, b| a.name().cmp(b.name()));
            Ok(result)
        }

        async fn create(&self, project: Project) -> Result<Project, DomainError> {
            let mut projects = self.projects.write().map_err(|_| lock_error())?;

            if projects.values().any(|p| p.name() == project.name()) {
                return Err(DomainError::conflict(format!(
                    "Project with name '{}' already exists",
                    project.name()
                )));
            }

            projects.insert(project.id().to_string(), project.clone());
            Ok(project)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_create_and_find() {
            let repo = InMemoryProjectRepository::new();
            let project = Project::new(ProjectId::from("p-1"), "invoices").with_description("AP");

            repo.create(project).await.unwrap();

            let by_id = repo.get(&ProjectId::from("p-1")).await.unwrap().unwrap();
            assert_eq!(by_id.description(), Some("AP"));
            assert!(repo.find_by_name("invoices").await.unwrap().is_some());
            assert_eq!(repo.list().await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_duplicate_name_is_conflict() {
            let repo = InMemoryProjectRepository::new();
            repo.create(Project::new(ProjectId::generate(), "invoices"))
                .await
                .unwrap();

            let err = repo
                .create(Project::new(ProjectId::generate(), "invoices"))
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Conflict { .. }));
        }
    }
}
