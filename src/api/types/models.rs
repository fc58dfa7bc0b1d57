//! Modeling request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::model::Model;
use crate::domain::project::Project;

/// POST /v1/projects body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectBody {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectResponse {
    pub fn from_domain(project: &Project) -> Self {
        Self {
            id: project.id().as_str().to_string(),
            name: project.name().to_string(),
            description: project.description().map(str::to_string),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// POST /v1/models body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateModelBody {
    pub name: String,
    #[serde(rename = "type")]
    pub model_type: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Model metadata; content bytes are never echoed back
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub model_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub version: u32,
    pub content_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ModelResponse {
    pub fn from_domain(model: &Model) -> Self {
        Self {
            id: model.id().as_str().to_string(),
            name: model.name().to_string(),
            model_type: model.model_type().to_string(),
            project_id: model.project_id().map(|p| p.as_str().to_string()),
            version: model.version(),
            content_size: model.content().map(<[u8]>::len).unwrap_or(0),
            extensions: model.extensions().cloned(),
            created_at: model.created_at(),
            updated_at: model.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelTypesResponse {
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ModelId;
    use crate::domain::project::ProjectId;

    #[test]
    fn test_model_response_serialization() {
        let mut model = Model::new(ModelId::new("m-1"), "order-data", "json")
            .with_project(ProjectId::new("p-1"));
        model.set_content(b"{}".to_vec());

        let json = serde_json::to_value(ModelResponse::from_domain(&model)).unwrap();

        assert_eq!(json["id"], "m-1");
        assert_eq!(json["type"], "json");
        assert_eq!(json["projectId"], "p-1");
        assert_eq!(json["contentSize"], 2);
        assert_eq!(json["version"], 2);
        assert!(json.get("extensions").is_none());
    }

    #[test]
    fn test_create_model_body() {
        let body: CreateModelBody =
            serde_json::from_str(r#"{"name":"order-data","type":"form"}"#).unwrap();

        assert_eq!(body.model_type, "form");
        assert!(body.project_id.is_none());
    }
}
