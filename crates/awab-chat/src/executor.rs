//! Sequential batch execution.
//!
//! A batch runs its commands strictly one after another through an explicit
//! state machine:
//!
//! Idle -> Announcing(0) -> Resolving(0) -> Delaying(0) -> Announcing(1) -> ...
//! -> Delaying(n-1) -> Completed
//!
//! The only suspension point is the inter-step delay. A step whose command
//! is not recognized (or whose resolver fails) is reported and the batch
//! carries on.

use std::sync::Arc;
use std::time::Duration;

use awab_command::{CommandResolver, ResolverOutcome};

use crate::error::ChatError;
use crate::response;
use crate::transcript::Transcript;
use crate::types::{BatchReport, BatchState, StepReport};

/// Validate that a batch state transition is allowed for a batch of `len`
/// commands.
///
/// Valid transitions:
/// - Idle -> Announcing(0)
/// - Announcing(i) -> Resolving(i)
/// - Resolving(i) -> Delaying(i)
/// - Delaying(i) -> Announcing(i + 1) while i + 1 < len
/// - Delaying(len - 1) -> Completed
pub fn validate_transition(
    from: BatchState,
    to: BatchState,
    len: usize,
) -> Result<(), ChatError> {
    let valid = match (from, to) {
        (BatchState::Idle, BatchState::Announcing(0)) => len > 0,
        (BatchState::Announcing(i), BatchState::Resolving(j)) => i == j && i < len,
        (BatchState::Resolving(i), BatchState::Delaying(j)) => i == j && i < len,
        (BatchState::Delaying(i), BatchState::Announcing(j)) => j == i + 1 && j < len,
        (BatchState::Delaying(i), BatchState::Completed) => i + 1 == len,
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ChatError::InvalidTransition(from, to))
    }
}

/// An ordered, immutable list of commands plus a cursor.
#[derive(Debug, Clone)]
pub struct CommandBatch {
    commands: Vec<String>,
    cursor: usize,
    state: BatchState,
    steps: Vec<StepReport>,
}

impl CommandBatch {
    /// Create a batch. A batch always holds at least two commands.
    pub fn new(commands: Vec<String>) -> Result<Self, ChatError> {
        if commands.len() < 2 {
            return Err(ChatError::BatchTooSmall(commands.len()));
        }
        Ok(Self {
            commands,
            cursor: 0,
            state: BatchState::Idle,
            steps: Vec::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Index of the command currently being worked on.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state == BatchState::Completed
    }

    fn transition(&mut self, to: BatchState) -> Result<(), ChatError> {
        validate_transition(self.state, to, self.commands.len())?;
        self.state = to;
        Ok(())
    }

    fn into_report(self) -> BatchReport {
        BatchReport { steps: self.steps }
    }
}

/// Resolve one command, folding resolver failures into `Unrecognized`.
pub(crate) async fn resolve_or_unrecognized(
    resolver: &dyn CommandResolver,
    command: &str,
) -> ResolverOutcome {
    match resolver.resolve(command).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(command = %command, error = %e, "Command resolver failed");
            ResolverOutcome::Unrecognized
        }
    }
}

/// Drives command batches to completion, writing progress to the transcript.
pub struct BatchExecutor {
    resolver: Arc<dyn CommandResolver>,
    transcript: Arc<Transcript>,
    step_delay: Duration,
}

impl BatchExecutor {
    pub fn new(
        resolver: Arc<dyn CommandResolver>,
        transcript: Arc<Transcript>,
        step_delay: Duration,
    ) -> Self {
        Self {
            resolver,
            transcript,
            step_delay,
        }
    }

    /// Run every command of a batch in order and report each step.
    pub async fn run(&self, commands: Vec<String>) -> Result<BatchReport, ChatError> {
        let mut batch = CommandBatch::new(commands)?;
        tracing::info!(steps = batch.len(), "Batch started");

        while !batch.is_terminal() {
            self.advance(&mut batch).await?;
        }

        let report = batch.into_report();
        tracing::info!(
            steps = report.steps.len(),
            unrecognized = report.steps.iter().filter(|s| !s.recognized).count(),
            "Batch completed"
        );
        Ok(report)
    }

    /// Perform exactly one state transition, emitting its messages.
    ///
    /// Returns the new state. Advancing a completed batch is an error.
    pub async fn advance(&self, batch: &mut CommandBatch) -> Result<BatchState, ChatError> {
        let count = batch.len();

        match batch.state {
            BatchState::Idle => {
                self.transcript
                    .append_assistant_message(&response::batch_summary(count))?;
                batch.transition(BatchState::Announcing(0))?;
            }
            BatchState::Announcing(i) => {
                let command = &batch.commands[i];
                self.transcript
                    .append_assistant_message(&response::step_progress(i, count, command))?;
                batch.transition(BatchState::Resolving(i))?;
            }
            BatchState::Resolving(i) => {
                let command = batch.commands[i].clone();
                let outcome = resolve_or_unrecognized(self.resolver.as_ref(), &command).await;
                let recognized = outcome.is_recognized();
                let reply = match outcome {
                    ResolverOutcome::Recognized(message) => message,
                    ResolverOutcome::Unrecognized => response::step_failure(&command),
                };
                self.transcript.append_assistant_message(&reply)?;
                tracing::debug!(step = i + 1, total = count, recognized, "Batch step resolved");
                batch.steps.push(StepReport {
                    index: i,
                    command,
                    recognized,
                });
                batch.transition(BatchState::Delaying(i))?;
            }
            BatchState::Delaying(i) => {
                if !self.step_delay.is_zero() {
                    tokio::time::sleep(self.step_delay).await;
                }
                if i + 1 < count {
                    batch.cursor = i + 1;
                    batch.transition(BatchState::Announcing(i + 1))?;
                } else {
                    batch.cursor = count;
                    self.transcript
                        .append_assistant_message(response::BATCH_COMPLETE)?;
                    batch.transition(BatchState::Completed)?;
                }
            }
            BatchState::Completed => return Err(ChatError::BatchFinished),
        }

        Ok(batch.state)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use awab_command::CommandError;
    use std::sync::Mutex;

    /// Recognizes anything starting with "ok", fails on "boom".
    struct ScriptedResolver {
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedResolver {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandResolver for ScriptedResolver {
        async fn resolve(&self, command: &str) -> Result<ResolverOutcome, CommandError> {
            self.calls.lock().unwrap().push(command.to_string());
            if command == "boom" {
                return Err(CommandError::HandlerFailed("exploded".to_string()));
            }
            if command.starts_with("ok") {
                Ok(ResolverOutcome::Recognized(format!("done {}", command)))
            } else {
                Ok(ResolverOutcome::Unrecognized)
            }
        }
    }

    fn executor() -> (BatchExecutor, Arc<ScriptedResolver>, Arc<Transcript>) {
        let resolver = Arc::new(ScriptedResolver::new());
        let transcript = Arc::new(Transcript::new());
        let exec = BatchExecutor::new(
            Arc::clone(&resolver) as Arc<dyn CommandResolver>,
            Arc::clone(&transcript),
            Duration::ZERO,
        );
        (exec, resolver, transcript)
    }

    fn commands(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn texts(transcript: &Transcript) -> Vec<String> {
        transcript.messages().into_iter().map(|m| m.text).collect()
    }

    // ---- Transition table ----

    #[test]
    fn test_valid_transitions() {
        assert!(validate_transition(BatchState::Idle, BatchState::Announcing(0), 2).is_ok());
        assert!(
            validate_transition(BatchState::Announcing(1), BatchState::Resolving(1), 2).is_ok()
        );
        assert!(validate_transition(BatchState::Resolving(0), BatchState::Delaying(0), 2).is_ok());
        assert!(
            validate_transition(BatchState::Delaying(0), BatchState::Announcing(1), 2).is_ok()
        );
        assert!(validate_transition(BatchState::Delaying(1), BatchState::Completed, 2).is_ok());
    }

    #[test]
    fn test_invalid_transitions() {
        // Skipping a step
        assert!(
            validate_transition(BatchState::Delaying(0), BatchState::Announcing(2), 3).is_err()
        );
        // Completing early
        assert!(validate_transition(BatchState::Delaying(0), BatchState::Completed, 3).is_err());
        // Resolving without announcing
        assert!(validate_transition(BatchState::Idle, BatchState::Resolving(0), 2).is_err());
        // Overlapping steps
        assert!(
            validate_transition(BatchState::Resolving(0), BatchState::Resolving(1), 2).is_err()
        );
        // Past the end
        assert!(
            validate_transition(BatchState::Delaying(1), BatchState::Announcing(2), 2).is_err()
        );
        // Nothing leaves Completed
        assert!(validate_transition(BatchState::Completed, BatchState::Idle, 2).is_err());
    }

    #[test]
    fn test_transition_error_mentions_states() {
        let err = validate_transition(BatchState::Idle, BatchState::Completed, 2).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("idle"));
        assert!(msg.contains("completed"));
    }

    // ---- CommandBatch ----

    #[test]
    fn test_batch_requires_two_commands() {
        assert!(matches!(
            CommandBatch::new(commands(&["ok"])).unwrap_err(),
            ChatError::BatchTooSmall(1)
        ));
        assert!(matches!(
            CommandBatch::new(vec![]).unwrap_err(),
            ChatError::BatchTooSmall(0)
        ));
    }

    #[test]
    fn test_new_batch_is_idle() {
        let batch = CommandBatch::new(commands(&["a", "b"])).unwrap();
        assert_eq!(batch.state(), BatchState::Idle);
        assert_eq!(batch.cursor(), 0);
        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());
        assert!(!batch.is_terminal());
    }

    // ---- Stepping ----

    #[tokio::test]
    async fn test_advance_walks_every_state() {
        let (exec, _, _) = executor();
        let mut batch = CommandBatch::new(commands(&["ok a", "ok b"])).unwrap();

        let mut states = Vec::new();
        while !batch.is_terminal() {
            states.push(exec.advance(&mut batch).await.unwrap());
        }

        assert_eq!(
            states,
            vec![
                BatchState::Announcing(0),
                BatchState::Resolving(0),
                BatchState::Delaying(0),
                BatchState::Announcing(1),
                BatchState::Resolving(1),
                BatchState::Delaying(1),
                BatchState::Completed,
            ]
        );
        assert_eq!(batch.cursor(), 2);
    }

    #[tokio::test]
    async fn test_advance_after_completion_errors() {
        let (exec, _, _) = executor();
        let mut batch = CommandBatch::new(commands(&["ok a", "ok b"])).unwrap();
        while !batch.is_terminal() {
            exec.advance(&mut batch).await.unwrap();
        }
        assert!(matches!(
            exec.advance(&mut batch).await.unwrap_err(),
            ChatError::BatchFinished
        ));
    }

    // ---- Full runs ----

    #[tokio::test]
    async fn test_message_order() {
        let (exec, _, transcript) = executor();
        exec.run(commands(&["ok 1", "ok 2", "ok 3"])).await.unwrap();

        assert_eq!(
            texts(&transcript),
            vec![
                response::batch_summary(3),
                response::step_progress(0, 3, "ok 1"),
                "done ok 1".to_string(),
                response::step_progress(1, 3, "ok 2"),
                "done ok 2".to_string(),
                response::step_progress(2, 3, "ok 3"),
                "done ok 3".to_string(),
                response::BATCH_COMPLETE.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_unrecognized_steps_do_not_stop_batch() {
        let (exec, resolver, transcript) = executor();
        let report = exec
            .run(commands(&["nope", "ok go", "still nope"]))
            .await
            .unwrap();

        assert_eq!(report.steps.len(), 3);
        assert_eq!(
            report.steps.iter().map(|s| s.recognized).collect::<Vec<_>>(),
            vec![false, true, false]
        );
        assert_eq!(resolver.calls.lock().unwrap().len(), 3);

        let all = texts(&transcript);
        assert_eq!(all[2], response::step_failure("nope"));
        assert_eq!(all[6], response::step_failure("still nope"));
        assert_eq!(all.last().unwrap(), response::BATCH_COMPLETE);
    }

    #[tokio::test]
    async fn test_resolver_error_counts_as_unrecognized() {
        let (exec, _, transcript) = executor();
        let report = exec.run(commands(&["boom", "ok after"])).await.unwrap();

        assert!(!report.steps[0].recognized);
        assert!(report.steps[1].recognized);
        assert!(texts(&transcript).contains(&response::step_failure("boom")));
        assert_eq!(transcript.last().unwrap().text, response::BATCH_COMPLETE);
    }

    #[tokio::test]
    async fn test_all_unrecognized_still_completes() {
        let (exec, _, transcript) = executor();
        let report = exec.run(commands(&["x", "y"])).await.unwrap();
        assert!(report.steps.iter().all(|s| !s.recognized));
        assert_eq!(transcript.len(), 1 + 2 * 2 + 1);
        assert_eq!(transcript.last().unwrap().text, response::BATCH_COMPLETE);
    }

    #[tokio::test]
    async fn test_commands_resolved_in_order() {
        let (exec, resolver, _) = executor();
        exec.run(commands(&["ok c", "ok a", "ok b"])).await.unwrap();
        assert_eq!(
            *resolver.calls.lock().unwrap(),
            vec!["ok c".to_string(), "ok a".to_string(), "ok b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_step_delay_is_applied_between_steps() {
        let resolver = Arc::new(ScriptedResolver::new());
        let transcript = Arc::new(Transcript::new());
        let exec = BatchExecutor::new(resolver, transcript, Duration::from_millis(20));

        let start = std::time::Instant::now();
        exec.run(commands(&["ok 1", "ok 2"])).await.unwrap();
        // One delay after each step
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
