//! Per-call validation context

use crate::domain::model::Model;
use crate::domain::project::Project;

/// Metadata a validator may consult while checking a model.
///
/// Built per validation call from the model being validated and the project
/// that owns it. Never persisted.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    model_type: String,
    project: Option<Project>,
    models: Vec<Model>,
}

impl ValidationContext {
    /// Context with nothing in scope besides the model type
    pub fn empty(model_type: impl Into<String>) -> Self {
        Self {
            model_type: model_type.into(),
            project: None,
            models: Vec::new(),
        }
    }

    /// Context scoped to a model and, when it has one, its project siblings
    pub fn for_model(model: &Model, project: Option<Project>, siblings: Vec<Model>) -> Self {
        let mut models = Vec::with_capacity(siblings.len() + 1);
        models.push(model.clone());
        models.extend(siblings.into_iter().filter(|m| m.id() != model.id()));

        Self {
            model_type: model.model_type().to_string(),
            project,
            models,
        }
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn find_model_by_name(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name() == name)
    }

    /// True when no model is in scope
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
