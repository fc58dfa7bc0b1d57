//! Runtime and audit request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::audit::{AuditEvent, AuditEventType};
use crate::domain::process::{ProcessInstance, ProcessInstanceStatus, ProcessVariables};

/// POST /v1/process-instances body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartProcessBody {
    pub process_definition_key: String,
    #[serde(default)]
    pub business_key: Option<String>,
    #[serde(default)]
    pub variables: ProcessVariables,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInstanceResponse {
    pub id: String,
    pub process_definition_id: String,
    pub process_definition_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_key: Option<String>,
    #[serde(default, skip_serializing_if = "ProcessVariables::is_empty")]
    pub variables: ProcessVariables,
    pub status: ProcessInstanceStatus,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProcessInstanceResponse {
    pub fn from_domain(instance: &ProcessInstance) -> Self {
        Self {
            id: instance.id().to_string(),
            process_definition_id: instance.definition_id().to_string(),
            process_definition_key: instance.definition_key().to_string(),
            business_key: instance.business_key().map(str::to_string),
            variables: instance.variables().clone(),
            status: instance.status(),
            started_at: instance.started_at(),
            completed_at: instance.completed_at(),
        }
    }
}

/// GET /v1/audit/events query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventsQuery {
    pub process_instance_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEventResponse {
    pub id: String,
    pub event_type: AuditEventType,
    pub process_instance_id: String,
    pub process_definition_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl AuditEventResponse {
    pub fn from_domain(event: &AuditEvent) -> Self {
        Self {
            id: event.id().to_string(),
            event_type: event.event_type(),
            process_instance_id: event.process_instance_id().to_string(),
            process_definition_id: event.process_definition_id().to_string(),
            entity_id: event.entity_id().map(str::to_string),
            timestamp: event.timestamp(),
            payload: event.payload().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEventsResponse {
    pub events: Vec<AuditEventResponse>,
    pub count: usize,
}

impl AuditEventsResponse {
    pub fn new(events: Vec<AuditEventResponse>) -> Self {
        Self {
            count: events.len(),
            events,
        }
    }
}
