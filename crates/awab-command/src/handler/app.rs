//! App launch handler.
//!
//! Opens, closes and lists the applications the device knows about.

use async_trait::async_trait;

use crate::error::CommandError;
use crate::handler::CommandHandler;
use crate::types::{CommandKind, ParsedCommand};

/// Handler for open/close/list app commands.
pub struct AppHandler {
    installed: Vec<String>,
}

impl AppHandler {
    pub fn new(installed: Vec<String>) -> Self {
        Self { installed }
    }

    /// Find an installed app by case-insensitive name, allowing a partial
    /// match in either direction ("واتس" finds "واتساب").
    fn find(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.installed
            .iter()
            .find(|app| app.to_lowercase() == needle)
            .or_else(|| {
                self.installed.iter().find(|app| {
                    let app = app.to_lowercase();
                    app.contains(&needle) || needle.contains(&app)
                })
            })
            .map(String::as_str)
    }

    fn target<'a>(&'a self, command: &ParsedCommand) -> Result<&'a str, CommandError> {
        let name = command
            .argument
            .as_deref()
            .ok_or_else(|| CommandError::InvalidCommand("app name is missing".to_string()))?;
        self.find(name)
            .ok_or_else(|| CommandError::InvalidCommand(format!("app not installed: {}", name)))
    }
}

#[async_trait]
impl CommandHandler for AppHandler {
    fn kinds(&self) -> &'static [CommandKind] {
        &[
            CommandKind::OpenApp,
            CommandKind::CloseApp,
            CommandKind::ListApps,
        ]
    }

    async fn execute(&self, command: &ParsedCommand) -> Result<String, CommandError> {
        match command.kind {
            CommandKind::OpenApp => {
                let app = self.target(command)?;
                tracing::info!(app = %app, "App opened");
                Ok(format!("✅ تم فتح {}", app))
            }
            CommandKind::CloseApp => {
                let app = self.target(command)?;
                tracing::info!(app = %app, "App closed");
                Ok(format!("✅ تم إقفال {}", app))
            }
            CommandKind::ListApps => {
                if self.installed.is_empty() {
                    return Ok("📱 لا توجد تطبيقات مثبتة".to_string());
                }
                let list = self
                    .installed
                    .iter()
                    .map(|app| format!("• {}", app))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(format!(
                    "📱 التطبيقات المثبتة ({}):\n{}",
                    self.installed.len(),
                    list
                ))
            }
            other => Err(CommandError::UnregisteredHandler(other)),
        }
    }

    fn describe(&self, command: &ParsedCommand) -> String {
        let target = command.argument.as_deref().unwrap_or("<no app>");
        match command.kind {
            CommandKind::OpenApp => format!("Open app: {}", target),
            CommandKind::CloseApp => format!("Close app: {}", target),
            _ => "List installed apps".to_string(),
        }
    }
}
