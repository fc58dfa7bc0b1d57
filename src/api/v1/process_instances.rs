//! Process runtime endpoint handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ProcessInstanceResponse, StartProcessBody};
use crate::infrastructure::services::StartProcessRequest;

/// POST /v1/process-instances
pub async fn start_process_instance(
    State(state): State<AppState>,
    Json(body): Json<StartProcessBody>,
) -> Result<(StatusCode, Json<ProcessInstanceResponse>), ApiError> {
    debug!(definition_key = %body.process_definition_key, "Starting process instance");

    let instance = state
        .runtime_service
        .start_process(StartProcessRequest {
            process_definition_key: body.process_definition_key,
            business_key: body.business_key,
            variables: body.variables,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProcessInstanceResponse::from_domain(&instance)),
    ))
}

/// GET /v1/process-instances/{instance_id}
pub async fn get_process_instance(
    State(state): State<AppState>,
    Path(instance_id): Path<String>,
) -> Result<Json<ProcessInstanceResponse>, ApiError> {
    let instance = state.runtime_service.get_instance(&instance_id).await?;
    Ok(Json(ProcessInstanceResponse::from_domain(&instance)))
}
