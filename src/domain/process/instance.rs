//! Process instances

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ProcessDefinition, ProcessVariables};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessInstanceStatus {
    Running,
    Completed,
}

/// One execution of a process definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInstance {
    id: String,
    definition_id: String,
    definition_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_key: Option<String>,
    #[serde(default, skip_serializing_if = "ProcessVariables::is_empty")]
    variables: ProcessVariables,
    status: ProcessInstanceStatus,
    started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl ProcessInstance {
    pub fn start(definition: &ProcessDefinition, business_key: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            definition_id: definition.id().to_string(),
            definition_key: definition.key().to_string(),
            business_key,
            variables: ProcessVariables::new(),
            status: ProcessInstanceStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn with_variables(mut self, variables: ProcessVariables) -> Self {
        self.variables = variables;
        self
    }

    pub fn complete(&mut self) {
        self.status = ProcessInstanceStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn definition_id(&self) -> &str {
        &self.definition_id
    }

    pub fn definition_key(&self) -> &str {
        &self.definition_key
    }

    pub fn business_key(&self) -> Option<&str> {
        self.business_key.as_deref()
    }

    pub fn variables(&self) -> &ProcessVariables {
        &self.variables
    }

    pub fn status(&self) -> ProcessInstanceStatus {
        self.status
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_complete() {
        let definition = ProcessDefinition::simple_process();
        let mut instance = ProcessInstance::start(&definition, Some("order-1".to_string()));

        assert_eq!(instance.status(), ProcessInstanceStatus::Running);
        assert_eq!(instance.definition_id(), "SimpleProcess:1");
        assert_eq!(instance.business_key(), Some("order-1"));
        assert!(instance.completed_at().is_none());
        assert!(instance.variables().is_empty());

        instance.complete();
        assert_eq!(instance.status(), ProcessInstanceStatus::Completed);
        assert!(instance.completed_at().is_some());
    }
}
