//! Project endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::state::AppState;
use crate::api::types::{ApiError, CreateProjectBody, Json, ProjectResponse};
use crate::infrastructure::services::CreateProjectRequest;

/// GET /v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = state.project_service.list().await?;
    Ok(Json(projects.iter().map(ProjectResponse::from_domain).collect()))
}

/// POST /v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<CreateProjectBody>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let project = state
        .project_service
        .create(CreateProjectRequest {
            name: body.name,
            description: body.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from_domain(&project))))
}

/// GET /v1/projects/{project_id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = state.project_service.get(&project_id).await?;
    Ok(Json(ProjectResponse::from_domain(&project)))
}
