//! Command handler registry and trait definition.
//!
//! Defines the `CommandHandler` async trait and the registry that dispatches
//! a parsed command to the handler owning its kind.

pub mod app;
pub mod call;
pub mod system;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use awab_core::config::DeviceConfig;

use crate::error::CommandError;
use crate::types::{CommandKind, ParsedCommand};

pub use app::AppHandler;
pub use call::CallHandler;
pub use system::SystemHandler;

/// A device action implementation for one or more command kinds.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Kinds this handler executes.
    fn kinds(&self) -> &'static [CommandKind];

    /// Perform the action and return a human-readable result.
    async fn execute(&self, command: &ParsedCommand) -> Result<String, CommandError>;

    /// Short description of what executing `command` would do.
    fn describe(&self, command: &ParsedCommand) -> String;
}

/// Maps each command kind to the handler that executes it.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<CommandKind, Arc<dyn CommandHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every kind it declares. Later registrations
    /// replace earlier ones for the same kind.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        for kind in handler.kinds() {
            self.handlers.insert(*kind, Arc::clone(&handler));
        }
    }

    /// Register the simulated app, call and system handlers.
    pub fn register_defaults(&mut self, device: &DeviceConfig) {
        self.register(Arc::new(AppHandler::new(device.installed_apps.clone())));
        self.register(Arc::new(CallHandler::new(device.contacts.clone())));
        self.register(Arc::new(SystemHandler::new()));
    }

    pub fn get(&self, kind: CommandKind) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(&kind).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoHandler;

    #[async_trait]
    impl CommandHandler for EchoHandler {
        fn kinds(&self) -> &'static [CommandKind] {
            &[CommandKind::Back]
        }

        async fn execute(&self, command: &ParsedCommand) -> Result<String, CommandError> {
            Ok(command.raw.clone())
        }

        fn describe(&self, _command: &ParsedCommand) -> String {
            "echo".to_string()
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(CommandKind::Back).is_none());
    }

    #[test]
    fn test_register_defaults_covers_every_kind() {
        let mut registry = HandlerRegistry::new();
        registry.register_defaults(&DeviceConfig::default());
        assert_eq!(registry.len(), 15);
        for kind in [
            CommandKind::OpenApp,
            CommandKind::CloseApp,
            CommandKind::ListApps,
            CommandKind::Call,
            CommandKind::WifiOn,
            CommandKind::Tap,
        ] {
            assert!(registry.get(kind).is_some(), "missing handler for {}", kind);
        }
    }

    #[tokio::test]
    async fn test_later_registration_replaces_kind() {
        let mut registry = HandlerRegistry::new();
        registry.register_defaults(&DeviceConfig::default());
        registry.register(Arc::new(EchoHandler));

        let handler = registry.get(CommandKind::Back).unwrap();
        let command = ParsedCommand {
            kind: CommandKind::Back,
            argument: None,
            raw: "رجوع".to_string(),
        };
        assert_eq!(handler.execute(&command).await.unwrap(), "رجوع");
        assert_eq!(handler.describe(&command), "echo");
    }
}
