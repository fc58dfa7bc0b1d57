//! Command domain - units of work and their commit-phase hooks

mod context;
mod executor;
mod listener;

pub use context::{CloseOutcome, CommandContext, CommandContextState, StagedWrite};
pub use executor::CommandExecutor;
pub use listener::CommandContextCloseListener;

#[cfg(test)]
pub use listener::MockCommandContextCloseListener;
