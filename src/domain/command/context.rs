//! Unit of work state carried through one business operation

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use crate::domain::audit::AuditEvent;
use crate::domain::DomainError;

/// A durable write deferred until the unit of work commits
pub type StagedWrite = Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send>>;

/// How a unit of work ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Close listeners ran and staged writes were applied
    Published,
    /// The business operation failed; close listeners never ran
    RollbackSkip,
    /// A close listener failed; staged writes were discarded
    PublishFailed,
    /// Listeners succeeded but a staged write failed
    CommitFailed,
}

/// Lifecycle of a unit of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandContextState {
    Active,
    Committing,
    Closed(CloseOutcome),
}

/// Transactional scope of one business operation.
///
/// The operation records audit events and stages durable writes here; neither
/// becomes visible unless the operation succeeds and every close listener
/// accepts the context.
pub struct CommandContext {
    id: String,
    state: CommandContextState,
    events: Vec<AuditEvent>,
    staged: Mutex<Vec<StagedWrite>>,
}

impl CommandContext {
    pub(crate) fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: CommandContextState::Active,
            events: Vec::new(),
            staged: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> CommandContextState {
        self.state
    }

    /// Record an audit event to publish when the unit of work closes
    pub fn add_event(&mut self, event: AuditEvent) {
        self.events.push(event);
    }

    /// Events recorded so far, in recording order
    pub fn pending_events(&self) -> &[AuditEvent] {
        &self.events
    }

    /// Defer a durable write until commit
    pub fn on_commit<F>(&mut self, write: F)
    where
        F: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        self.staged_mut().push(Box::pin(write));
    }

    pub fn staged_write_count(&self) -> usize {
        self.staged
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub(crate) fn begin_commit(&mut self) {
        self.state = CommandContextState::Committing;
    }

    pub(crate) fn take_staged(&mut self) -> Vec<StagedWrite> {
        std::mem::take(self.staged_mut())
    }

    pub(crate) fn close(&mut self, outcome: CloseOutcome) {
        self.state = CommandContextState::Closed(outcome);
        if outcome != CloseOutcome::Published {
            self.staged_mut().clear();
        }
    }

    fn staged_mut(&mut self) -> &mut Vec<StagedWrite> {
        self.staged
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("events", &self.events.len())
            .field("staged_writes", &self.staged_write_count())
            .finish()
    }
}
