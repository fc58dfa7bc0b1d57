//! Audit event entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of process lifecycle facts recorded for audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    ProcessCreated,
    ProcessStarted,
    ProcessCompleted,
    ActivityStarted,
    ActivityCompleted,
    ErrorReceived,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProcessCreated => "PROCESS_CREATED",
            Self::ProcessStarted => "PROCESS_STARTED",
            Self::ProcessCompleted => "PROCESS_COMPLETED",
            Self::ActivityStarted => "ACTIVITY_STARTED",
            Self::ActivityCompleted => "ACTIVITY_COMPLETED",
            Self::ErrorReceived => "ERROR_RECEIVED",
        }
    }
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A BPMN error thrown by an activity and caught by the process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmnError {
    pub error_id: String,
    pub error_code: String,
    pub element_id: String,
    pub process_instance_id: String,
    pub process_definition_id: String,
}

/// Immutable audit fact produced inside a unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    id: String,
    event_type: AuditEventType,
    process_instance_id: String,
    process_definition_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
    timestamp: DateTime<Utc>,
    payload: Value,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        process_instance_id: impl Into<String>,
        process_definition_id: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_type,
            process_instance_id: process_instance_id.into(),
            process_definition_id: process_definition_id.into(),
            entity_id: None,
            timestamp: Utc::now(),
            payload: Value::Null,
        }
    }

    /// Event recording a caught BPMN error.
    ///
    /// Process identifiers come from the error and the erroring element
    /// becomes the entity.
    pub fn error_received(error: &BpmnError) -> Self {
        let payload = serde_json::to_value(error).unwrap_or(Value::Null);

        Self::new(
            AuditEventType::ErrorReceived,
            error.process_instance_id.clone(),
            error.process_definition_id.clone(),
        )
        .with_entity_id(error.element_id.clone())
        .with_payload(payload)
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn event_type(&self) -> AuditEventType {
        self.event_type
    }

    pub fn process_instance_id(&self) -> &str {
        &self.process_instance_id
    }

    pub fn process_definition_id(&self) -> &str {
        &self.process_definition_id
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}
