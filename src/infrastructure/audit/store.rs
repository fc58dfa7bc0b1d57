//! In-memory audit event store fed by the audit channel

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::audit::{AuditEvent, AuditEventRepository, AuditEventSubscriber};
use crate::domain::DomainError;

/// Keeps every delivered audit event, queryable by process instance
pub struct InMemoryAuditEventStore {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditEventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryAuditEventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditEventSubscriber for InMemoryAuditEventStore {
    fn on_batch(&self, batch: &[AuditEvent]) {
        let mut events = self.events.write().unwrap_or_else(|poisoned| {
            warn!(batch_size = batch.len(), "Audit store lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        });
        events.extend_from_slice(batch);
    }
}

#[async_trait]
impl AuditEventRepository for InMemoryAuditEventStore {
    async fn list(&self) -> Result<Vec<AuditEvent>, DomainError> {
        let events = self
            .events
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(events.clone())
    }

    async fn find_by_process_instance(
        &self,
        process_instance_id: &str,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        let events = self
            .events
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(events
            .iter()
            .filter(|e| e.process_instance_id() == process_instance_id)
            .cloned()
            .collect())
    }
}
