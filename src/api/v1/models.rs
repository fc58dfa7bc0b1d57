//! Model endpoint handlers

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::debug;

use super::upload::read_file_part;
use crate::api::state::AppState;
use crate::api::types::{
    ApiError, CreateModelBody, Json, ModelResponse, ModelTypesResponse, ModelsResponse,
};
use crate::infrastructure::services::CreateModelRequest;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsQuery {
    pub project_id: Option<String>,
}

/// GET /v1/models
pub async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ListModelsQuery>,
) -> Result<Json<ModelsResponse>, ApiError> {
    let models = state
        .model_service
        .list(query.project_id.as_deref())
        .await?;

    Ok(Json(ModelsResponse {
        models: models.iter().map(ModelResponse::from_domain).collect(),
    }))
}

/// POST /v1/models
pub async fn create_model(
    State(state): State<AppState>,
    Json(body): Json<CreateModelBody>,
) -> Result<(StatusCode, Json<ModelResponse>), ApiError> {
    debug!(name = %body.name, model_type = %body.model_type, "Creating model");

    let model = state
        .model_service
        .create(CreateModelRequest {
            name: body.name,
            model_type: body.model_type,
            project_id: body.project_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ModelResponse::from_domain(&model))))
}

/// GET /v1/models/{model_id}
pub async fn get_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<ModelResponse>, ApiError> {
    let model = state.model_service.get(&model_id).await?;
    Ok(Json(ModelResponse::from_domain(&model)))
}

/// PUT /v1/models/{model_id}/content
pub async fn upload_model_content(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ModelResponse>, ApiError> {
    let content = read_file_part(multipart).await?;
    let model = state.model_service.upload_content(&model_id, content).await?;

    Ok(Json(ModelResponse::from_domain(&model)))
}

/// PUT /v1/models/{model_id}/extensions
pub async fn upload_model_extensions(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ModelResponse>, ApiError> {
    let content = read_file_part(multipart).await?;
    let model = state
        .model_service
        .upload_extensions(&model_id, content)
        .await?;

    Ok(Json(ModelResponse::from_domain(&model)))
}

/// GET /v1/model-types
pub async fn list_model_types(State(state): State<AppState>) -> Json<ModelTypesResponse> {
    let types = state
        .validation_service
        .registry()
        .types()
        .into_iter()
        .map(str::to_string)
        .collect();

    Json(ModelTypesResponse { types })
}
