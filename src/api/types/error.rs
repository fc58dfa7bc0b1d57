//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::validation::{ModelValidationError, ValidationError, ValidationErrorKind};
use crate::domain::DomainError;

/// Error categories reported in generic error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ConflictError,
    ProcessError,
    UpstreamError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::ProcessError => write!(f, "process_error"),
            Self::UpstreamError => write!(f, "upstream_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Body returned when model content or extensions fail validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelValidationBody {
    pub kind: ValidationErrorKind,
    pub message: String,
    pub errors: Vec<ValidationError>,
}

impl From<ModelValidationError> for ModelValidationBody {
    fn from(err: ModelValidationError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            errors: err.into_errors(),
        }
    }
}

/// Serialized error body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorResponse {
    Validation(ModelValidationBody),
    Error { error: ApiErrorDetail },
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse::Error {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        if let ApiErrorResponse::Error { error } = &mut self.response {
            error.code = Some(code.into());
        }
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            ApiErrorType::InvalidRequestError,
            message,
        )
    }

    /// A process failed while executing
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::ProcessError,
            message,
        )
    }

    /// A downstream transport refused the request
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, ApiErrorType::UpstreamError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            message,
        )
    }

    /// Structured validation failure
    pub fn model_validation(err: ModelValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ApiErrorResponse::Validation(err.into()),
        }
    }

    pub fn message(&self) -> &str {
        match &self.response {
            ApiErrorResponse::Validation(body) => &body.message,
            ApiErrorResponse::Error { error } => &error.message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidId { message } => {
                Self::bad_request(message).with_code("invalid_id")
            }
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Internal { message } => Self::internal(message),
            DomainError::ModelValidation(e) => Self::model_validation(e),
            DomainError::Publish(e) => {
                Self::bad_gateway(e.to_string()).with_code("audit_publish_failed")
            }
            DomainError::Runtime { message } => Self::unprocessable(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::PublishError;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("No file part");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No file part");
    }

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("x"), StatusCode::CONFLICT),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::runtime("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (
                DomainError::Publish(PublishError::rejected(3, "down")),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (domain_err, status) in cases {
            assert_eq!(ApiError::from(domain_err).status, status);
        }
    }

    #[test]
    fn test_model_validation_body() {
        let err = ModelValidationError::semantic(vec![
            ValidationError::at("#", "required key [id] not found"),
            ValidationError::at("#", "required key [name] not found"),
        ]);
        let api_err = ApiError::from(DomainError::from(err));

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_value(&api_err.response).unwrap();
        assert_eq!(json["kind"], "semantic");
        assert_eq!(
            json["message"],
            "Semantic model validation errors encountered: 2 schema violations found"
        );
        assert_eq!(json["errors"][0]["problem"], "required key [id] not found");
        assert_eq!(
            json["errors"][1]["description"],
            "#: required key [name] not found"
        );
    }

    #[test]
    fn test_generic_error_serialization() {
        let err = ApiError::not_found("Model 'x' not found");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "not_found_error");
        assert_eq!(json["error"]["message"], "Model 'x' not found");
        assert!(json["error"].get("code").is_none());
    }
}
