//! Audit event store trait

use async_trait::async_trait;

use super::AuditEvent;
use crate::domain::DomainError;

/// Read side of the audit event store
#[async_trait]
pub trait AuditEventRepository: Send + Sync {
    /// All stored events, in delivery order
    async fn list(&self) -> Result<Vec<AuditEvent>, DomainError>;

    /// Events of one process instance, in delivery order
    async fn find_by_process_instance(
        &self,
        process_instance_id: &str,
    ) -> Result<Vec<AuditEvent>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.list().await?.len())
    }
}
