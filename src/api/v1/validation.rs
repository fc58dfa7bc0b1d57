//! Model validation endpoint handlers

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
};
use tracing::debug;

use super::upload::read_file_part;
use crate::api::state::AppState;
use crate::api::types::ApiError;

/// POST /v1/models/{model_id}/validate
pub async fn validate_model_content(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, ApiError> {
    let content = read_file_part(multipart).await?;
    debug!(model_id = %model_id, bytes = content.len(), "Validating model content");

    state
        .validation_service
        .validate_content(&model_id, &content)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/models/{model_id}/validate/extensions
pub async fn validate_model_extensions(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StatusCode, ApiError> {
    let content = read_file_part(multipart).await?;
    debug!(model_id = %model_id, bytes = content.len(), "Validating model extensions");

    state
        .validation_service
        .validate_extensions(&model_id, &content)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
