//! Runtime service - starts process instances inside a unit of work

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::audit::{AuditEvent, AuditEventType, BpmnError};
use crate::domain::command::{CommandContext, CommandExecutor};
use crate::domain::process::{
    convert_variables, ActivityKind, ProcessDefinition, ProcessDefinitionRepository,
    ProcessInstance, ProcessInstanceRepository, ProcessVariables,
};
use crate::domain::DomainError;

/// Request to start a process instance
#[derive(Debug, Clone)]
pub struct StartProcessRequest {
    pub process_definition_key: String,
    pub business_key: Option<String>,
    pub variables: ProcessVariables,
}

/// Executes process definitions.
///
/// Each start runs as one command: the instance is saved and its audit events
/// are published together when the unit of work commits, or not at all.
pub struct RuntimeService {
    definitions: Arc<dyn ProcessDefinitionRepository>,
    instances: Arc<dyn ProcessInstanceRepository>,
    executor: CommandExecutor,
}

impl RuntimeService {
    pub fn new(
        definitions: Arc<dyn ProcessDefinitionRepository>,
        instances: Arc<dyn ProcessInstanceRepository>,
        executor: CommandExecutor,
    ) -> Self {
        Self {
            definitions,
            instances,
            executor,
        }
    }

    /// Start the latest version of a process definition and run it to its end
    pub async fn start_process(
        &self,
        request: StartProcessRequest,
    ) -> Result<ProcessInstance, DomainError> {
        let key = request.process_definition_key;
        let variables = convert_variables(request.variables)?;

        let definition = self
            .definitions
            .find_latest_by_key(&key)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(format!("Process definition '{}' not found", key))
            })?;

        let instances = self.instances.clone();
        let business_key = request.business_key;

        let result = self
            .executor
            .execute(move |ctx| {
                let instance = run_process(&definition, business_key, variables, ctx)?;

                let staged = instance.clone();
                ctx.on_commit(async move { instances.save(staged).await.map(|_| ()) });

                Ok(instance)
            })
            .await;

        match &result {
            Ok(instance) => {
                counter!("process_instances_started_total", "definition" => key.clone())
                    .increment(1);
                info!(
                    process_instance_id = %instance.id(),
                    definition_key = %key,
                    "Process instance completed"
                );
            }
            Err(e) => {
                counter!("process_instances_failed_total", "definition" => key.clone())
                    .increment(1);
                warn!(definition_key = %key, error = %e, "Process instance failed");
            }
        }

        result
    }

    pub async fn get_instance(&self, id: &str) -> Result<ProcessInstance, DomainError> {
        self.instances
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Process instance '{}' not found", id)))
    }

    pub async fn list_definitions(&self) -> Result<Vec<ProcessDefinition>, DomainError> {
        self.definitions.list().await
    }
}

/// Walk the activities of a definition, recording audit events on the way
fn run_process(
    definition: &ProcessDefinition,
    business_key: Option<String>,
    variables: ProcessVariables,
    ctx: &mut CommandContext,
) -> Result<ProcessInstance, DomainError> {
    let mut instance = ProcessInstance::start(definition, business_key).with_variables(variables);
    let instance_id = instance.id().to_string();
    let definition_id = definition.id().to_string();

    let event = |event_type: AuditEventType| {
        AuditEvent::new(event_type, instance_id.clone(), definition_id.clone())
    };

    ctx.add_event(
        event(AuditEventType::ProcessCreated)
            .with_entity_id(instance_id.clone())
            .with_payload(json!({
                "processDefinitionKey": definition.key(),
                "businessKey": instance.business_key(),
                "variables": instance.variables(),
            })),
    );
    ctx.add_event(event(AuditEventType::ProcessStarted).with_entity_id(instance_id.clone()));

    for activity in definition.activities() {
        let payload = json!({
            "activityName": activity.name,
            "activityType": activity.kind.element_type(),
        });

        ctx.add_event(
            event(AuditEventType::ActivityStarted)
                .with_entity_id(activity.id.clone())
                .with_payload(payload.clone()),
        );

        if let ActivityKind::ErrorTask { error_code, caught } = &activity.kind {
            if !caught {
                return Err(DomainError::runtime(format!(
                    "Unhandled BPMN error '{}' thrown by activity '{}'",
                    error_code, activity.id
                )));
            }

            let error = BpmnError {
                error_id: uuid::Uuid::new_v4().to_string(),
                error_code: error_code.clone(),
                element_id: activity.id.clone(),
                process_instance_id: instance_id.clone(),
                process_definition_id: definition_id.clone(),
            };
            ctx.add_event(AuditEvent::error_received(&error));
        }

        ctx.add_event(
            event(AuditEventType::ActivityCompleted)
                .with_entity_id(activity.id.clone())
                .with_payload(payload),
        );
    }

    instance.complete();
    ctx.add_event(event(AuditEventType::ProcessCompleted).with_entity_id(instance_id.clone()));

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::{AuditEventRepository, PublishError};
    use crate::domain::command::MockCommandContextCloseListener;
    use crate::domain::process::ProcessInstanceStatus;
    use crate::infrastructure::audit::{
        InMemoryAuditChannel, InMemoryAuditEventStore, MessageProducerCloseListener,
    };
    use crate::infrastructure::process::{
        InMemoryProcessDefinitionRepository, InMemoryProcessInstanceRepository,
    };

    struct Fixture {
        service: RuntimeService,
        instances: Arc<InMemoryProcessInstanceRepository>,
        channel: Arc<InMemoryAuditChannel>,
        store: Arc<InMemoryAuditEventStore>,
    }

    fn fixture() -> Fixture {
        let instances = Arc::new(InMemoryProcessInstanceRepository::new());
        let channel = Arc::new(InMemoryAuditChannel::new());
        let store = Arc::new(InMemoryAuditEventStore::new());
        channel.subscribe(store.clone());

        let executor = CommandExecutor::new().with_close_listener(Arc::new(
            MessageProducerCloseListener::new(channel.clone()),
        ));

        let service = RuntimeService::new(
            Arc::new(InMemoryProcessDefinitionRepository::with_builtin_definitions()),
            instances.clone(),
            executor,
        );

        Fixture {
            service,
            instances,
            channel,
            store,
        }
    }

    fn start(key: &str) -> StartProcessRequest {
        StartProcessRequest {
            process_definition_key: key.to_string(),
            business_key: None,
            variables: ProcessVariables::new(),
        }
    }

    #[tokio::test]
    async fn test_simple_process_publishes_all_events() {
        let f = fixture();

        let instance = f.service.start_process(start("SimpleProcess")).await.unwrap();

        assert_eq!(instance.status(), ProcessInstanceStatus::Completed);
        assert!(f.instances.get(instance.id()).await.unwrap().is_some());

        let types: Vec<AuditEventType> = f
            .store
            .find_by_process_instance(instance.id())
            .await
            .unwrap()
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(
            types,
            vec![
                AuditEventType::ProcessCreated,
                AuditEventType::ProcessStarted,
                AuditEventType::ActivityStarted,
                AuditEventType::ActivityCompleted,
                AuditEventType::ActivityStarted,
                AuditEventType::ActivityCompleted,
                AuditEventType::ActivityStarted,
                AuditEventType::ActivityCompleted,
                AuditEventType::ProcessCompleted,
            ]
        );
        assert_eq!(f.channel.received_events().len(), 9);
    }

    #[tokio::test]
    async fn test_rollback_process_never_fires_close_listener() {
        let mut listener = MockCommandContextCloseListener::new();
        listener.expect_closed().times(0);

        let instances = Arc::new(InMemoryProcessInstanceRepository::new());
        let service = RuntimeService::new(
            Arc::new(InMemoryProcessDefinitionRepository::with_builtin_definitions()),
            instances.clone(),
            CommandExecutor::new().with_close_listener(Arc::new(listener)),
        );

        let result = service.start_process(start("rollbackProcess")).await;

        assert!(matches!(result, Err(DomainError::Runtime { .. })));
        assert!(instances
            .find_by_definition_key("rollbackProcess")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_rollback_process_publishes_nothing() {
        let f = fixture();

        let result = f.service.start_process(start("rollbackProcess")).await;

        assert!(result.is_err());
        assert!(f.channel.received_events().is_empty());
        assert_eq!(f.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_discards_instance() {
        let f = fixture();
        f.channel.set_rejecting(true);

        let result = f.service.start_process(start("SimpleProcess")).await;

        match result {
            Err(DomainError::Publish(PublishError::Rejected { batch_size, .. })) => {
                assert_eq!(batch_size, 9);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(f
            .instances
            .find_by_definition_key("SimpleProcess")
            .await
            .unwrap()
            .is_empty());
        assert!(f.channel.received_events().is_empty());
        assert!(f.store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_after_publish_discards_instance_and_events() {
        let instances = Arc::new(InMemoryProcessInstanceRepository::new());
        let channel = Arc::new(InMemoryAuditChannel::new());
        let store = Arc::new(InMemoryAuditEventStore::new());
        channel.subscribe(store.clone());

        let mut failing = MockCommandContextCloseListener::new();
        failing
            .expect_closed()
            .times(1)
            .returning(|_| Err(DomainError::internal("Test exception")));
        failing.expect_committed().times(0);
        failing.expect_close_failure().times(1).return_const(());

        let service = RuntimeService::new(
            Arc::new(InMemoryProcessDefinitionRepository::with_builtin_definitions()),
            instances.clone(),
            CommandExecutor::new()
                .with_close_listener(Arc::new(MessageProducerCloseListener::new(channel.clone())))
                .with_close_listener(Arc::new(failing)),
        );

        let result = service.start_process(start("SimpleProcess")).await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
        assert!(instances
            .find_by_definition_key("SimpleProcess")
            .await
            .unwrap()
            .is_empty());
        assert!(channel.received_events().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_variables_are_converted_and_recorded() {
        let f = fixture();
        let mut request = start("SimpleProcess");
        request.variables.insert("amount".to_string(), json!(250));
        request
            .variables
            .insert("customer".to_string(), json!("{\"name\":\"Ada\"}"));

        let instance = f.service.start_process(request).await.unwrap();

        assert_eq!(instance.variables()["amount"], json!(250));
        assert_eq!(instance.variables()["customer"], json!({"name": "Ada"}));

        let saved = f.instances.get(instance.id()).await.unwrap().unwrap();
        assert_eq!(saved.variables(), instance.variables());

        let events = f.store.find_by_process_instance(instance.id()).await.unwrap();
        assert_eq!(events[0].event_type(), AuditEventType::ProcessCreated);
        assert_eq!(
            events[0].payload()["variables"],
            json!({"amount": 250, "customer": {"name": "Ada"}})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_variable_starts_nothing() {
        let f = fixture();
        let mut request = start("SimpleProcess");
        request
            .variables
            .insert("customer".to_string(), json!("{\"name\": "));

        let result = f.service.start_process(request).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(f
            .instances
            .find_by_definition_key("SimpleProcess")
            .await
            .unwrap()
            .is_empty());
        assert!(f.channel.received_events().is_empty());
    }

    #[tokio::test]
    async fn test_caught_error_records_error_received() {
        let f = fixture();

        let instance = f
            .service
            .start_process(start("errorHandlingProcess"))
            .await
            .unwrap();

        let events = f.store.find_by_process_instance(instance.id()).await.unwrap();
        let received: Vec<&AuditEvent> = events
            .iter()
            .filter(|e| e.event_type() == AuditEventType::ErrorReceived)
            .collect();

        assert_eq!(received.len(), 1);
        assert_eq!(received[0].entity_id(), Some("chargeCard"));
        assert_eq!(received[0].process_definition_id(), "errorHandlingProcess:1");
        assert_eq!(received[0].payload()["error_code"], "PAYMENT_DECLINED");
        assert_eq!(instance.status(), ProcessInstanceStatus::Completed);
    }

    #[tokio::test]
    async fn test_unknown_definition() {
        let f = fixture();

        let result = f.service.start_process(start("missing")).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(f.channel.received_events().is_empty());
    }

    #[tokio::test]
    async fn test_get_instance() {
        let f = fixture();
        let mut request = start("SimpleProcess");
        request.business_key = Some("order-7".to_string());

        let started = f.service.start_process(request).await.unwrap();
        let loaded = f.service.get_instance(started.id()).await.unwrap();

        assert_eq!(loaded.business_key(), Some("order-7"));
        assert!(matches!(
            f.service.get_instance("nope").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
