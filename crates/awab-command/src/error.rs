//! Error types for command resolution.

use crate::types::CommandKind;

/// Errors from command handlers and resolvers.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Command handler failed: {0}")]
    HandlerFailed(String),
    #[error("Command kind not registered: {0}")]
    UnregisteredHandler(CommandKind),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Command timed out after {0} ms")]
    Timeout(u64),
}
