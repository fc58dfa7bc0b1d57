//! BPM Cloud modeling service
//!
//! Hosts BPM modeling artifacts with:
//! - Per-type content and extensions validation
//! - Validation endpoints that dispatch to exactly one validator
//! - A process runtime whose audit events publish only when its unit of work commits

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::audit::AuditEventRepository;
use domain::{CommandExecutor, ModelRepository, ModelTypeRegistry, ProjectRepository};
use domain::model::InMemoryModelRepository;
use domain::project::InMemoryProjectRepository;
use infrastructure::audit::{
    InMemoryAuditChannel, InMemoryAuditEventStore, MessageProducerCloseListener,
};
use infrastructure::process::{
    InMemoryProcessDefinitionRepository, InMemoryProcessInstanceRepository,
};
use infrastructure::services::{
    ModelService, ModelValidationService, ProjectService, RuntimeService,
};
use infrastructure::validation::builtin_model_types;
use tracing::{info, warn};

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state with the built-in model types
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let registry = builtin_model_types()
        .map_err(|e| anyhow::anyhow!("Failed to register model types: {}", e))?;

    info!(types = ?registry.types(), "Model types registered");

    Ok(build_app_state(config, registry))
}

/// Wire repositories, audit plumbing and services around a model type registry
pub fn build_app_state(config: &AppConfig, registry: ModelTypeRegistry) -> AppState {
    let models: Arc<dyn ModelRepository> = Arc::new(InMemoryModelRepository::new());
    let projects: Arc<dyn ProjectRepository> = Arc::new(InMemoryProjectRepository::new());

    let validation_service = Arc::new(ModelValidationService::new(
        models.clone(),
        projects.clone(),
        Arc::new(registry),
    ));
    let model_service = Arc::new(ModelService::new(
        models,
        projects.clone(),
        validation_service.clone(),
    ));
    let project_service = Arc::new(ProjectService::new(projects));

    let channel = Arc::new(InMemoryAuditChannel::new());
    let store = Arc::new(InMemoryAuditEventStore::new());
    channel.subscribe(store.clone());

    let mut executor = CommandExecutor::new();
    if config.audit.enabled {
        executor = executor.with_close_listener(Arc::new(MessageProducerCloseListener::new(
            channel.clone(),
        )));
    } else {
        warn!("Audit publishing disabled, process events will not be recorded");
    }

    let runtime_service = Arc::new(RuntimeService::new(
        Arc::new(InMemoryProcessDefinitionRepository::with_builtin_definitions()),
        Arc::new(InMemoryProcessInstanceRepository::new()),
        executor,
    ));

    let audit_events: Arc<dyn AuditEventRepository> = store;

    AppState::new(
        model_service,
        project_service,
        validation_service,
        runtime_service,
        audit_events,
    )
    .with_max_upload_bytes(config.modeling.max_upload_bytes)
}
