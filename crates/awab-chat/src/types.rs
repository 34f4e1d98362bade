use awab_core::types::{Author, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fallback::FallbackKind;

/// One entry of the transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    /// Position in the transcript, starting at 0 and increasing by one per append.
    pub ordinal: u64,
    pub author: Author,
    pub text: String,
    pub created_at: Timestamp,
}

/// Lifecycle of a multi-command batch.
///
/// Idle -> Announcing(0) -> Resolving(0) -> Delaying(0) -> Announcing(1) -> ...
/// -> Delaying(n-1) -> Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "step", rename_all = "snake_case")]
pub enum BatchState {
    Idle,
    Announcing(usize),
    Resolving(usize),
    Delaying(usize),
    Completed,
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchState::Idle => write!(f, "idle"),
            BatchState::Announcing(i) => write!(f, "announcing({})", i),
            BatchState::Resolving(i) => write!(f, "resolving({})", i),
            BatchState::Delaying(i) => write!(f, "delaying({})", i),
            BatchState::Completed => write!(f, "completed"),
        }
    }
}

/// What happened to one step of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub index: usize,
    pub command: String,
    pub recognized: bool,
}

/// Per-step record of a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub steps: Vec<StepReport>,
}

/// Which path a user turn took through the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRoute {
    /// Nothing left after segmentation; answered with the generic reply.
    Degenerate,
    /// A single command the resolver recognized.
    Command,
    /// A single command the resolver did not recognize.
    Fallback(FallbackKind),
    /// Several commands run in order.
    Batch(BatchReport),
}

/// Everything a single call to `handle_message` appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub route: TurnRoute,
    pub user_message: ChatMessage,
    pub replies: Vec<ChatMessage>,
}
