//! In-memory audit channel

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::audit::{AuditEvent, AuditEventPublisher, AuditEventSubscriber, PublishError};

/// Delivers audit batches to subscribers and keeps a log of delivered events.
///
/// Published batches are staged per transaction and only reach the log and
/// the subscribers on commit. A committed batch is appended and fanned out
/// under one write lock, so readers see either all of a batch or none of it.
pub struct InMemoryAuditChannel {
    staged: Mutex<HashMap<String, Vec<AuditEvent>>>,
    delivered: RwLock<Vec<AuditEvent>>,
    subscribers: RwLock<Vec<Arc<dyn AuditEventSubscriber>>>,
    rejecting: AtomicBool,
}

impl InMemoryAuditChannel {
    pub fn new() -> Self {
        Self {
            staged: Mutex::new(HashMap::new()),
            delivered: RwLock::new(Vec::new()),
            subscribers: RwLock::new(Vec::new()),
            rejecting: AtomicBool::new(false),
        }
    }

    /// Attach a consumer that receives every delivered batch
    pub fn subscribe(&self, subscriber: Arc<dyn AuditEventSubscriber>) {
        match self.subscribers.write() {
            Ok(mut subscribers) => subscribers.push(subscriber),
            Err(poisoned) => poisoned.into_inner().push(subscriber),
        }
    }

    /// Make the channel refuse (or accept again) every batch
    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }

    pub fn is_rejecting(&self) -> bool {
        self.rejecting.load(Ordering::SeqCst)
    }

    /// Every event delivered so far, in delivery order
    pub fn received_events(&self) -> Vec<AuditEvent> {
        match self.delivered.read() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of transactions with a batch awaiting commit or rollback
    pub fn staged_transactions(&self) -> usize {
        self.staged_lock().len()
    }

    fn staged_lock(&self) -> MutexGuard<'_, HashMap<String, Vec<AuditEvent>>> {
        self.staged.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryAuditChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditEventPublisher for InMemoryAuditChannel {
    async fn publish(
        &self,
        transaction_id: &str,
        batch: Vec<AuditEvent>,
    ) -> Result<(), PublishError> {
        let batch_size = batch.len();

        if self.is_rejecting() {
            warn!(transaction_id, batch_size, "Audit channel is rejecting batches");
            return Err(PublishError::rejected(batch_size, "channel unavailable"));
        }

        self.staged_lock()
            .entry(transaction_id.to_string())
            .or_default()
            .extend(batch);

        debug!(transaction_id, batch_size, "Audit batch staged");
        Ok(())
    }

    async fn commit(&self, transaction_id: &str) {
        let Some(batch) = self.staged_lock().remove(transaction_id) else {
            debug!(transaction_id, "Nothing staged to commit");
            return;
        };

        let mut delivered = self
            .delivered
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let subscribers = self
            .subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        for subscriber in subscribers.iter() {
            subscriber.on_batch(&batch);
        }

        let batch_size = batch.len();
        delivered.extend(batch);

        debug!(
            transaction_id,
            batch_size,
            subscribers = subscribers.len(),
            total = delivered.len(),
            "Audit batch delivered"
        );
    }

    async fn rollback(&self, transaction_id: &str) {
        if let Some(batch) = self.staged_lock().remove(transaction_id) {
            debug!(transaction_id, batch_size = batch.len(), "Staged audit batch discarded");
        }
    }
}
