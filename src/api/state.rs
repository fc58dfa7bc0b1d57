//! Application state for shared services

use std::sync::Arc;

use crate::domain::audit::AuditEventRepository;
use crate::infrastructure::services::{
    ModelService, ModelValidationService, ProjectService, RuntimeService,
};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub model_service: Arc<ModelService>,
    pub project_service: Arc<ProjectService>,
    pub validation_service: Arc<ModelValidationService>,
    pub runtime_service: Arc<RuntimeService>,
    pub audit_events: Arc<dyn AuditEventRepository>,
    /// Largest accepted request body on upload routes
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        model_service: Arc<ModelService>,
        project_service: Arc<ProjectService>,
        validation_service: Arc<ModelValidationService>,
        runtime_service: Arc<RuntimeService>,
        audit_events: Arc<dyn AuditEventRepository>,
    ) -> Self {
        Self {
            model_service,
            project_service,
            validation_service,
            runtime_service,
            audit_events,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
