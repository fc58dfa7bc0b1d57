//! Commit-phase hook seam

use async_trait::async_trait;

use super::CommandContext;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Hooks invoked while a unit of work whose business operation succeeded is
/// closing.
///
/// `closed` runs first for every listener; an error aborts the commit and is
/// returned to the caller of the operation. Afterwards exactly one of
/// `committed` or `close_failure` runs for every listener.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommandContextCloseListener: Send + Sync {
    async fn closed(&self, context: &CommandContext) -> Result<(), DomainError>;

    /// Staged writes were applied; work prepared in `closed` may become visible
    async fn committed(&self, _context: &CommandContext) {}

    /// The commit was aborted after `closed` started; prepared work must be
    /// discarded
    async fn close_failure(&self, _context: &CommandContext) {}
}
