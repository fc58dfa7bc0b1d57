//! Audit channel seams

use async_trait::async_trait;
use thiserror::Error;

use super::AuditEvent;

#[cfg(test)]
use mockall::automock;

/// The transport refused a batch of audit events
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("Audit channel rejected batch of {batch_size} events: {reason}")]
    Rejected { batch_size: usize, reason: String },
}

impl PublishError {
    pub fn rejected(batch_size: usize, reason: impl Into<String>) -> Self {
        Self::Rejected {
            batch_size,
            reason: reason.into(),
        }
    }
}

/// Two-phase delivery of a unit of work's audit events.
///
/// `publish` stages the batch under the unit of work's transaction id and may
/// refuse it. Staged events stay invisible to consumers until `commit`
/// delivers the whole batch at once; `rollback` discards it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditEventPublisher: Send + Sync {
    async fn publish(&self, transaction_id: &str, batch: Vec<AuditEvent>)
        -> Result<(), PublishError>;

    async fn commit(&self, transaction_id: &str);

    async fn rollback(&self, transaction_id: &str);
}

/// Receives every batch delivered by an audit channel
pub trait AuditEventSubscriber: Send + Sync {
    fn on_batch(&self, batch: &[AuditEvent]);
}
