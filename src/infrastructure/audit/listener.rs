//! Close listener publishing a unit of work's audit events

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use tracing::{debug, warn};

use crate::domain::audit::AuditEventPublisher;
use crate::domain::command::{CommandContext, CommandContextCloseListener};
use crate::domain::DomainError;

/// Publishes every pending audit event of a closing unit of work as one batch.
///
/// The batch is staged under the unit of work's id while the context closes
/// and committed only once the staged writes were applied. A publish failure
/// is returned to the executor, which rolls the unit of work back; any later
/// failure rolls the staged batch back.
pub struct MessageProducerCloseListener {
    publisher: Arc<dyn AuditEventPublisher>,
}

impl MessageProducerCloseListener {
    pub fn new(publisher: Arc<dyn AuditEventPublisher>) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl CommandContextCloseListener for MessageProducerCloseListener {
    async fn closed(&self, context: &CommandContext) -> Result<(), DomainError> {
        let events = context.pending_events();

        if events.is_empty() {
            debug!(context_id = %context.id(), "No audit events to publish");
            return Ok(());
        }

        let batch_size = events.len();

        match self.publisher.publish(context.id(), events.to_vec()).await {
            Ok(()) => {
                debug!(context_id = %context.id(), batch_size, "Audit batch staged");
                Ok(())
            }
            Err(e) => {
                counter!("audit_publish_failures_total").increment(1);
                warn!(
                    context_id = %context.id(),
                    batch_size,
                    error = %e,
                    "Failed to publish audit batch"
                );
                Err(DomainError::Publish(e))
            }
        }
    }

    async fn committed(&self, context: &CommandContext) {
        let batch_size = context.pending_events().len();
        if batch_size == 0 {
            return;
        }

        self.publisher.commit(context.id()).await;
        counter!("audit_batches_published_total").increment(1);
        counter!("audit_events_published_total").increment(batch_size as u64);
        debug!(context_id = %context.id(), batch_size, "Audit batch published");
    }

    async fn close_failure(&self, context: &CommandContext) {
        let batch_size = context.pending_events().len();
        if batch_size == 0 {
            return;
        }

        self.publisher.rollback(context.id()).await;
        counter!("audit_batches_rolled_back_total").increment(1);
        debug!(context_id = %context.id(), batch_size, "Audit batch rolled back");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::{AuditEvent, AuditEventType, MockAuditEventPublisher, PublishError};
    use crate::domain::command::{
        CloseOutcome, CommandContextState, CommandExecutor, MockCommandContextCloseListener,
    };
    use crate::infrastructure::audit::InMemoryAuditChannel;

    fn event(event_type: AuditEventType) -> AuditEvent {
        AuditEvent::new(event_type, "pi-1", "SimpleProcess:1")
    }

    fn executor(publisher: MockAuditEventPublisher) -> CommandExecutor {
        CommandExecutor::new().with_close_listener(Arc::new(MessageProducerCloseListener::new(
            Arc::new(publisher),
        )))
    }

    fn failing_listener() -> MockCommandContextCloseListener {
        let mut listener = MockCommandContextCloseListener::new();
        listener
            .expect_closed()
            .times(1)
            .returning(|_| Err(DomainError::internal("Test exception")));
        listener.expect_committed().times(0);
        listener.expect_close_failure().times(1).return_const(());
        listener
    }

    /// Stages through the real listener, then fails the close itself
    struct PublishThenFail {
        inner: MessageProducerCloseListener,
    }

    #[async_trait]
    impl CommandContextCloseListener for PublishThenFail {
        async fn closed(&self, context: &CommandContext) -> Result<(), DomainError> {
            self.inner.closed(context).await?;
            Err(DomainError::internal("Test exception"))
        }

        async fn committed(&self, context: &CommandContext) {
            self.inner.committed(context).await;
        }

        async fn close_failure(&self, context: &CommandContext) {
            self.inner.close_failure(context).await;
        }
    }

    #[tokio::test]
    async fn test_publishes_pending_events_as_one_batch() {
        let mut publisher = MockAuditEventPublisher::new();
        publisher
            .expect_publish()
            .withf(|_, batch| {
                batch.len() == 2
                    && batch[0].event_type() == AuditEventType::ProcessCreated
                    && batch[1].event_type() == AuditEventType::ProcessStarted
            })
            .times(1)
            .returning(|_, _| Ok(()));
        publisher.expect_commit().times(1).return_const(());
        publisher.expect_rollback().times(0);

        let (result, state) = executor(publisher)
            .execute_tracked(|ctx| {
                ctx.add_event(event(AuditEventType::ProcessCreated));
                ctx.add_event(event(AuditEventType::ProcessStarted));
                Ok(())
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(state, CommandContextState::Closed(CloseOutcome::Published));
    }

    #[tokio::test]
    async fn test_batch_is_staged_and_committed_under_context_id() {
        let mut publisher = MockAuditEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .returning(|_, _| Ok(()));
        publisher
            .expect_commit()
            .withf(|tx| !tx.is_empty())
            .times(1)
            .return_const(());
        publisher.expect_rollback().times(0);
        let listener = MessageProducerCloseListener::new(Arc::new(publisher));

        let mut context = CommandContext::new();
        context.add_event(event(AuditEventType::ProcessCreated));

        listener.closed(&context).await.unwrap();
        listener.committed(&context).await;
    }

    #[tokio::test]
    async fn test_empty_batch_is_not_published() {
        let mut publisher = MockAuditEventPublisher::new();
        publisher.expect_publish().times(0);
        publisher.expect_commit().times(0);
        publisher.expect_rollback().times(0);

        let result = executor(publisher).execute(|_| Ok(42)).await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_failed_command_publishes_nothing() {
        let mut publisher = MockAuditEventPublisher::new();
        publisher.expect_publish().times(0);
        publisher.expect_commit().times(0);
        publisher.expect_rollback().times(0);

        let result: Result<(), _> = executor(publisher)
            .execute(|ctx| {
                ctx.add_event(event(AuditEventType::ProcessCreated));
                Err(DomainError::runtime("boom"))
            })
            .await;

        assert!(matches!(result, Err(DomainError::Runtime { .. })));
    }

    #[tokio::test]
    async fn test_publish_failure_propagates_and_rolls_back() {
        let mut publisher = MockAuditEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .returning(|_, batch| Err(PublishError::rejected(batch.len(), "broker down")));
        publisher.expect_commit().times(0);
        publisher.expect_rollback().times(1).return_const(());

        let (result, state) = executor(publisher)
            .execute_tracked(|ctx| {
                ctx.add_event(event(AuditEventType::ProcessCreated));
                Ok(())
            })
            .await;

        match result {
            Err(DomainError::Publish(PublishError::Rejected { batch_size, reason })) => {
                assert_eq!(batch_size, 1);
                assert_eq!(reason, "broker down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(state, CommandContextState::Closed(CloseOutcome::PublishFailed));
    }

    #[tokio::test]
    async fn test_later_listener_failure_withdraws_published_batch() {
        let channel = Arc::new(InMemoryAuditChannel::new());
        let executor = CommandExecutor::new()
            .with_close_listener(Arc::new(MessageProducerCloseListener::new(channel.clone())))
            .with_close_listener(Arc::new(failing_listener()));

        let (result, state) = executor
            .execute_tracked(|ctx| {
                ctx.add_event(event(AuditEventType::ProcessCreated));
                ctx.add_event(event(AuditEventType::ProcessStarted));
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
        assert_eq!(state, CommandContextState::Closed(CloseOutcome::PublishFailed));
        assert!(channel.received_events().is_empty());
        assert_eq!(channel.staged_transactions(), 0);
    }

    #[tokio::test]
    async fn test_failure_after_publish_in_same_listener_withdraws_batch() {
        let channel = Arc::new(InMemoryAuditChannel::new());
        let executor = CommandExecutor::new().with_close_listener(Arc::new(PublishThenFail {
            inner: MessageProducerCloseListener::new(channel.clone()),
        }));

        let result = executor
            .execute(|ctx| {
                ctx.add_event(event(AuditEventType::ProcessCreated));
                Ok(())
            })
            .await;

        assert!(result.is_err());
        assert!(channel.received_events().is_empty());
        assert_eq!(channel.staged_transactions(), 0);
    }

    #[tokio::test]
    async fn test_failed_staged_write_withdraws_published_batch() {
        let channel = Arc::new(InMemoryAuditChannel::new());
        let executor = CommandExecutor::new()
            .with_close_listener(Arc::new(MessageProducerCloseListener::new(channel.clone())));

        let (result, state) = executor
            .execute_tracked(|ctx| {
                ctx.add_event(event(AuditEventType::ProcessCreated));
                ctx.on_commit(async { Err(DomainError::internal("disk full")) });
                Ok(())
            })
            .await;

        assert!(result.is_err());
        assert_eq!(state, CommandContextState::Closed(CloseOutcome::CommitFailed));
        assert!(channel.received_events().is_empty());
        assert_eq!(channel.staged_transactions(), 0);
    }

    #[tokio::test]
    async fn test_successful_commit_makes_batch_visible() {
        let channel = Arc::new(InMemoryAuditChannel::new());
        let executor = CommandExecutor::new()
            .with_close_listener(Arc::new(MessageProducerCloseListener::new(channel.clone())));

        executor
            .execute(|ctx| {
                ctx.add_event(event(AuditEventType::ProcessCreated));
                ctx.on_commit(async { Ok(()) });
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(channel.received_events().len(), 1);
    }
}
