//! v1 API endpoints

pub mod audit;
pub mod models;
pub mod process_instances;
pub mod projects;
pub mod upload;
pub mod validation;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/{project_id}", get(projects::get_project))
        .route("/models", get(models::list_models).post(models::create_model))
        .route("/models/{model_id}", get(models::get_model))
        .route("/models/{model_id}/content", put(models::upload_model_content))
        .route(
            "/models/{model_id}/extensions",
            put(models::upload_model_extensions),
        )
        .route(
            "/models/{model_id}/validate",
            post(validation::validate_model_content),
        )
        .route(
            "/models/{model_id}/validate/extensions",
            post(validation::validate_model_extensions),
        )
        .route("/model-types", get(models::list_model_types))
        .route(
            "/process-instances",
            post(process_instances::start_process_instance),
        )
        .route(
            "/process-instances/{instance_id}",
            get(process_instances::get_process_instance),
        )
        .route("/audit/events", get(audit::list_audit_events))
}
