//! Runs business operations inside a unit of work

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::{CloseOutcome, CommandContext, CommandContextCloseListener, CommandContextState};
use crate::domain::DomainError;

/// Executes commands and drives their unit of work to a close.
///
/// Close listeners run inline, in registration order, only after the command
/// returned successfully. Staged writes are applied only after every listener
/// succeeded, and listeners learn the outcome through `committed` or
/// `close_failure`.
#[derive(Clone, Default)]
pub struct CommandExecutor {
    listeners: Vec<Arc<dyn CommandContextCloseListener>>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_close_listener(mut self, listener: Arc<dyn CommandContextCloseListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Run a command, returning its value once the unit of work committed
    pub async fn execute<T, F>(&self, command: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut CommandContext) -> Result<T, DomainError> + Send,
        T: Send,
    {
        self.execute_tracked(command).await.0
    }

    /// Run a command and also report the state the unit of work closed in
    pub async fn execute_tracked<T, F>(
        &self,
        command: F,
    ) -> (Result<T, DomainError>, CommandContextState)
    where
        F: FnOnce(&mut CommandContext) -> Result<T, DomainError> + Send,
        T: Send,
    {
        let mut context = CommandContext::new();

        let value = match command(&mut context) {
            Ok(value) => value,
            Err(e) => {
                context.close(CloseOutcome::RollbackSkip);
                warn!(
                    context_id = %context.id(),
                    error = %e,
                    "Command failed, unit of work rolled back"
                );
                return (Err(e), context.state());
            }
        };

        context.begin_commit();
        let staged = context.take_staged();

        for listener in &self.listeners {
            if let Err(e) = listener.closed(&context).await {
                warn!(
                    context_id = %context.id(),
                    discarded_writes = staged.len(),
                    error = %e,
                    "Close listener failed, unit of work rolled back"
                );
                self.abort(&mut context, CloseOutcome::PublishFailed).await;
                return (Err(e), context.state());
            }
        }

        for write in staged {
            if let Err(e) = write.await {
                error!(
                    context_id = %context.id(),
                    error = %e,
                    "Staged write failed after close listeners ran"
                );
                self.abort(&mut context, CloseOutcome::CommitFailed).await;
                return (Err(e), context.state());
            }
        }

        context.close(CloseOutcome::Published);
        for listener in &self.listeners {
            listener.committed(&context).await;
        }

        debug!(
            context_id = %context.id(),
            events = context.pending_events().len(),
            "Unit of work committed"
        );

        (Ok(value), context.state())
    }

    async fn abort(&self, context: &mut CommandContext, outcome: CloseOutcome) {
        context.close(outcome);
        for listener in &self.listeners {
            listener.close_failure(context).await;
        }
    }
}
