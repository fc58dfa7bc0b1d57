//! Model entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::project::ProjectId;

/// Model identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named modeling artifact of a declared type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    id: ModelId,

    name: String,

    /// Type tag selecting the validators, e.g. `json` or `process`
    model_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<Vec<u8>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    extensions: Option<Value>,

    /// Incremented on every content or extensions upload
    version: u32,

    created_at: DateTime<Utc>,

    updated_at: DateTime<Utc>,
}

impl Model {
    pub fn new(id: ModelId, name: impl Into<String>, model_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            model_type: model_type.into(),
            project_id: None,
            content: None,
            extensions: None,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    pub fn content(&self) -> Option<&[u8]> {
        self.content.as_deref()
    }

    pub fn extensions(&self) -> Option<&Value> {
        self.extensions.as_ref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the content; callers validate before calling
    pub fn set_content(&mut self, content: Vec<u8>) {
        self.content = Some(content);
        self.touch();
    }

    /// Replace the extensions document; callers validate before calling
    pub fn set_extensions(&mut self, extensions: Value) {
        self.extensions = Some(extensions);
        self.touch();
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}
