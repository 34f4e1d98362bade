//! Chat orchestrator: central coordinator wiring segmenter, resolver,
//! batch executor, fallback responder and transcript.
//!
//! One call to `handle_message` is one user turn. Turns are serialized, so
//! messages from two turns never interleave in the transcript.

use std::sync::Arc;
use std::time::Duration;

use awab_command::{CommandResolver, ResolverOutcome};
use awab_core::config::ChatConfig;
use tokio::sync::Mutex as AsyncMutex;

use crate::error::ChatError;
use crate::executor::{resolve_or_unrecognized, BatchExecutor};
use crate::fallback::{FallbackReply, FallbackResponder};
use crate::navigation::SettingsNavigator;
use crate::segmenter::Segmenter;
use crate::transcript::Transcript;
use crate::types::{TurnReport, TurnRoute};

/// Central chat orchestrator for a single session.
pub struct ChatOrchestrator {
    segmenter: Segmenter,
    responder: FallbackResponder,
    resolver: Arc<dyn CommandResolver>,
    navigator: Arc<dyn SettingsNavigator>,
    executor: BatchExecutor,
    transcript: Arc<Transcript>,
    config: ChatConfig,
    turn_lock: AsyncMutex<()>,
}

impl ChatOrchestrator {
    /// Create an orchestrator with a fresh transcript.
    ///
    /// Posts the configured welcome message, if any, as the first message.
    pub fn new(
        config: ChatConfig,
        resolver: Arc<dyn CommandResolver>,
        navigator: Arc<dyn SettingsNavigator>,
    ) -> Result<Self, ChatError> {
        Self::with_transcript(config, resolver, navigator, Arc::new(Transcript::new()))
    }

    /// Create an orchestrator writing to an existing transcript.
    pub fn with_transcript(
        config: ChatConfig,
        resolver: Arc<dyn CommandResolver>,
        navigator: Arc<dyn SettingsNavigator>,
        transcript: Arc<Transcript>,
    ) -> Result<Self, ChatError> {
        let segmenter = Segmenter::new(config.separators.as_slice())?;
        let executor = BatchExecutor::new(
            Arc::clone(&resolver),
            Arc::clone(&transcript),
            Duration::from_millis(config.step_delay_ms),
        );

        if !config.welcome_message.is_empty() {
            transcript.append_assistant_message(&config.welcome_message)?;
        }

        tracing::debug!(
            session_id = %transcript.session_id(),
            separators = ?segmenter.tokens(),
            "Chat session opened"
        );

        Ok(Self {
            segmenter,
            responder: FallbackResponder::new(),
            resolver,
            navigator,
            executor,
            transcript,
            config,
            turn_lock: AsyncMutex::new(()),
        })
    }

    pub fn transcript(&self) -> Arc<Transcript> {
        Arc::clone(&self.transcript)
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Handle one user utterance.
    ///
    /// Appends the user message, waits the thinking delay, then routes:
    /// nothing left after segmentation goes to the generic reply, a single
    /// command is resolved directly (falling back to a canned reply when
    /// unrecognized), and several commands run as a batch. Every accepted
    /// turn appends at least one assistant message.
    pub async fn handle_message(&self, message: &str) -> Result<TurnReport, ChatError> {
        let max = self.config.max_message_length;
        if message.chars().count() > max {
            return Err(ChatError::MessageTooLong(max));
        }

        let _turn = self.turn_lock.lock().await;

        let text = message.trim();
        let user_message = self.transcript.append_user_message(text)?;
        tracing::debug!(ordinal = user_message.ordinal, "Turn started");

        if self.config.thinking_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.thinking_delay_ms)).await;
        }

        let candidates = self.segmenter.segment(text);
        let route = match candidates.len() {
            0 => {
                tracing::debug!("No command left after segmentation");
                self.transcript
                    .append_assistant_message(FallbackResponder::unknown().text)?;
                TurnRoute::Degenerate
            }
            1 => self.handle_single(&candidates[0]).await?,
            _ => TurnRoute::Batch(self.executor.run(candidates).await?),
        };

        let replies = self.transcript.since(user_message.ordinal + 1);
        Ok(TurnReport {
            route,
            user_message,
            replies,
        })
    }

    async fn handle_single(&self, command: &str) -> Result<TurnRoute, ChatError> {
        match resolve_or_unrecognized(self.resolver.as_ref(), command).await {
            ResolverOutcome::Recognized(message) => {
                self.transcript.append_assistant_message(&message)?;
                Ok(TurnRoute::Command)
            }
            ResolverOutcome::Unrecognized => {
                let reply = self.responder.reply(command);
                self.apply_fallback(&reply)?;
                Ok(TurnRoute::Fallback(reply.kind))
            }
        }
    }

    fn apply_fallback(&self, reply: &FallbackReply) -> Result<(), ChatError> {
        tracing::debug!(kind = ?reply.kind, "Answering with fallback reply");
        if reply.opens_settings {
            tracing::info!("Opening settings");
            self.navigator.open_settings();
        }
        self.transcript.append_assistant_message(reply.text)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
