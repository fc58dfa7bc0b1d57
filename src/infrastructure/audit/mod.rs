//! Audit infrastructure - channel, publishing close listener and event store

mod channel;
mod listener;
mod store;

pub use channel::InMemoryAuditChannel;
pub use listener::MessageProducerCloseListener;
pub use store::InMemoryAuditEventStore;
