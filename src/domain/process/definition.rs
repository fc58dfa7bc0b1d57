//! Process definitions

use serde::{Deserialize, Serialize};

/// Kind of a single activity in a linear process definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityKind {
    StartEvent,
    ServiceTask,
    /// Throws a BPMN error; when `caught` the process records it and
    /// continues, otherwise the whole operation fails
    ErrorTask { error_code: String, caught: bool },
    EndEvent,
}

impl ActivityKind {
    /// BPMN element name reported in audit payloads
    pub fn element_type(&self) -> &'static str {
        match self {
            Self::StartEvent => "startEvent",
            Self::ServiceTask | Self::ErrorTask { .. } => "serviceTask",
            Self::EndEvent => "endEvent",
        }
    }
}

/// An activity of a process definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl ActivityDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// A deployed process definition executed activity by activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    id: String,
    key: String,
    name: String,
    version: u32,
    activities: Vec<ActivityDefinition>,
}

impl ProcessDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>, version: u32) -> Self {
        let key = key.into();
        Self {
            id: format!("{}:{}", key, version),
            key,
            name: name.into(),
            version,
            activities: Vec::new(),
        }
    }

    pub fn with_activity(mut self, activity: ActivityDefinition) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn activities(&self) -> &[ActivityDefinition] {
        &self.activities
    }

    /// start -> service task -> end
    pub fn simple_process() -> Self {
        Self::new("SimpleProcess", "Simple Process", 1)
            .with_activity(ActivityDefinition::new(
                "startEvent",
                "Start",
                ActivityKind::StartEvent,
            ))
            .with_activity(ActivityDefinition::new(
                "performTask",
                "Perform task",
                ActivityKind::ServiceTask,
            ))
            .with_activity(ActivityDefinition::new("endEvent", "End", ActivityKind::EndEvent))
    }

    /// start -> uncaught error -> end; never completes
    pub fn rollback_process() -> Self {
        Self::new("rollbackProcess", "Rollback Process", 1)
            .with_activity(ActivityDefinition::new(
                "startEvent",
                "Start",
                ActivityKind::StartEvent,
            ))
            .with_activity(ActivityDefinition::new(
                "failingTask",
                "Failing task",
                ActivityKind::ErrorTask {
                    error_code: "ROLLBACK".to_string(),
                    caught: false,
                },
            ))
            .with_activity(ActivityDefinition::new("endEvent", "End", ActivityKind::EndEvent))
    }

    /// start -> caught error -> end
    pub fn error_handling_process() -> Self {
        Self::new("errorHandlingProcess", "Error Handling Process", 1)
            .with_activity(ActivityDefinition::new(
                "startEvent",
                "Start",
                ActivityKind::StartEvent,
            ))
            .with_activity(ActivityDefinition::new(
                "chargeCard",
                "Charge card",
                ActivityKind::ErrorTask {
                    error_code: "PAYMENT_DECLINED".to_string(),
                    caught: true,
                },
            ))
            .with_activity(ActivityDefinition::new("endEvent", "End", ActivityKind::EndEvent))
    }
}
