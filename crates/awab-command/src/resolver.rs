//! The command resolver boundary.
//!
//! `CommandResolver` is what the conversation engine calls once per command
//! string. `PatternResolver` is the built-in implementation: pattern match,
//! then dispatch to the registered handler.

use std::time::Duration;

use async_trait::async_trait;
use awab_core::config::DeviceConfig;

use crate::error::CommandError;
use crate::handler::HandlerRegistry;
use crate::patterns::CommandPatternSet;
use crate::types::ResolverOutcome;

const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(5);

/// Reply for a recognized command whose handler needs the accessibility layer
/// while it is switched off.
pub const ACCESSIBILITY_REQUIRED: &str =
    "⚠️ هذا الأمر يحتاج تفعيل خدمة إمكانية الوصول (Accessibility) من الإعدادات";

/// Turns one command string into an effect and a recognition outcome.
///
/// Implementations must be callable repeatedly and must not depend on the
/// order of previous calls.
#[async_trait]
pub trait CommandResolver: Send + Sync {
    async fn resolve(&self, command: &str) -> Result<ResolverOutcome, CommandError>;
}

/// Resolver backed by the regex pattern set and a handler registry.
pub struct PatternResolver {
    patterns: CommandPatternSet,
    registry: HandlerRegistry,
    timeout: Duration,
    accessibility_enabled: bool,
}

impl PatternResolver {
    pub fn new(patterns: CommandPatternSet, registry: HandlerRegistry) -> Self {
        Self {
            patterns,
            registry,
            timeout: DEFAULT_HANDLER_TIMEOUT,
            accessibility_enabled: true,
        }
    }

    /// Pattern set plus the default simulated handlers for `device`.
    pub fn with_defaults(device: &DeviceConfig) -> Self {
        let mut registry = HandlerRegistry::new();
        registry.register_defaults(device);
        Self::new(CommandPatternSet::new(), registry)
            .with_timeout(Duration::from_millis(device.handler_timeout_ms))
            .with_accessibility(device.accessibility_enabled)
    }

    /// Fail a command whose handler runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accessibility(mut self, enabled: bool) -> Self {
        self.accessibility_enabled = enabled;
        self
    }
}

#[async_trait]
impl CommandResolver for PatternResolver {
    async fn resolve(&self, command: &str) -> Result<ResolverOutcome, CommandError> {
        let Some(parsed) = self.patterns.parse(command) else {
            tracing::debug!(command = %command, "No command pattern matched");
            return Ok(ResolverOutcome::Unrecognized);
        };

        if parsed.kind.needs_accessibility() && !self.accessibility_enabled {
            tracing::info!(kind = %parsed.kind, "Command needs accessibility, which is disabled");
            return Ok(ResolverOutcome::Recognized(ACCESSIBILITY_REQUIRED.to_string()));
        }

        let handler = self
            .registry
            .get(parsed.kind)
            .ok_or(CommandError::UnregisteredHandler(parsed.kind))?;

        tracing::debug!(
            kind = %parsed.kind,
            action = %handler.describe(&parsed),
            "Dispatching command"
        );

        let message = tokio::time::timeout(self.timeout, handler.execute(&parsed))
            .await
            .map_err(|_| CommandError::Timeout(self.timeout.as_millis() as u64))??;
        Ok(ResolverOutcome::Recognized(message))
    }
}
