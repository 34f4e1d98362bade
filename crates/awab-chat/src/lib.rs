//! Conversational command engine for Awab.
//!
//! Splits an utterance into one or more commands, resolves them one at a
//! time with fixed pacing, falls back to canned replies when nothing is
//! recognized, and records everything in an append-only transcript.

pub mod error;
pub mod executor;
pub mod fallback;
pub mod navigation;
pub mod orchestrator;
pub mod response;
pub mod segmenter;
pub mod transcript;
pub mod types;

pub use error::ChatError;
pub use executor::{BatchExecutor, CommandBatch};
pub use fallback::{FallbackKind, FallbackReply, FallbackResponder};
pub use navigation::{NoopNavigator, SettingsNavigator};
pub use orchestrator::ChatOrchestrator;
pub use segmenter::Segmenter;
pub use transcript::Transcript;
pub use types::{BatchReport, BatchState, ChatMessage, StepReport, TurnReport, TurnRoute};
