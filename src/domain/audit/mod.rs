//! Audit domain - process lifecycle events and their delivery seams

mod event;
mod publisher;
mod repository;

pub use event::{AuditEvent, AuditEventType, BpmnError};
pub use publisher::{AuditEventPublisher, AuditEventSubscriber, PublishError};
pub use repository::AuditEventRepository;

#[cfg(test)]
pub use publisher::MockAuditEventPublisher;
