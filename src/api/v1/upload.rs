//! Multipart upload extraction

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use crate::api::types::ApiError;

/// Name of the multipart part carrying the uploaded document
pub const FILE_PART: &str = "file";

/// Read the bytes of the `file` part. The part's content type is ignored and
/// other parts are skipped.
pub async fn read_file_part(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<u8>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(e.body_text())
        } else {
            ApiError::bad_request(format!("Failed to read multipart field: {}", e.body_text()))
        }
    })? {
        if field.name() != Some(FILE_PART) {
            continue;
        }

        debug!(
            file_name = ?field.file_name(),
            content_type = ?field.content_type(),
            "Reading uploaded file part"
        );

        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large(e.body_text())
            } else {
                ApiError::bad_request(format!("Failed to read file part: {}", e.body_text()))
            }
        })?;

        return Ok(bytes.to_vec());
    }

    Err(ApiError::bad_request(format!(
        "Missing multipart part '{}'",
        FILE_PART
    )))
}
