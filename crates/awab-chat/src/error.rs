//! Error types for the conversation engine.

use crate::types::BatchState;

/// Errors from the chat engine.
///
/// An unrecognized command is not an error: it is a normal resolver outcome
/// and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("invalid separator: {0:?}")]
    InvalidSeparator(String),
    #[error("a batch needs at least two commands, got {0}")]
    BatchTooSmall(usize),
    #[error("invalid batch transition: {0} -> {1}")]
    InvalidTransition(BatchState, BatchState),
    #[error("batch already completed")]
    BatchFinished,
    #[error("transcript unavailable: {0}")]
    TranscriptUnavailable(String),
}
