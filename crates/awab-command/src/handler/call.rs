//! Call placement handler.
//!
//! Dials a contact by name or a raw phone number.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::CommandError;
use crate::handler::CommandHandler;
use crate::types::{CommandKind, ParsedCommand};

/// Handler for call commands.
///
/// Accepts the attached prepositions users type in front of a name
/// ("بأحمد", "لأحمد", "على أحمد").
pub struct CallHandler {
    contacts: BTreeMap<String, String>,
}

impl CallHandler {
    pub fn new(contacts: BTreeMap<String, String>) -> Self {
        Self { contacts }
    }

    /// Resolve the call target to `(display name, number)`.
    fn lookup(&self, target: &str) -> Option<(String, String)> {
        let target = target.trim();
        let target = target.strip_prefix("على ").unwrap_or(target).trim();

        if is_phone_number(target) {
            let number: String = target.chars().filter(|c| !c.is_whitespace()).collect();
            return Some((number.clone(), number));
        }

        let candidates = std::iter::once(target).chain(
            ["ب", "ل"]
                .into_iter()
                .filter_map(move |prefix| target.strip_prefix(prefix)),
        );

        for name in candidates {
            let name = name.trim();
            if let Some((contact, number)) = self
                .contacts
                .iter()
                .find(|(contact, _)| contact.to_lowercase() == name.to_lowercase())
            {
                return Some((contact.clone(), number.clone()));
            }
        }
        None
    }
}

fn is_phone_number(s: &str) -> bool {
    let digits = s.chars().filter(|c| c.is_ascii_digit()).count();
    digits >= 3
        && s
            .chars()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || c == '-' || c == ' ' || (c == '+' && i == 0))
}

#[async_trait]
impl CommandHandler for CallHandler {
    fn kinds(&self) -> &'static [CommandKind] {
        &[CommandKind::Call]
    }

    async fn execute(&self, command: &ParsedCommand) -> Result<String, CommandError> {
        let target = command
            .argument
            .as_deref()
            .ok_or_else(|| CommandError::InvalidCommand("call target is missing".to_string()))?;

        let (name, number) = self
            .lookup(target)
            .ok_or_else(|| CommandError::InvalidCommand(format!("unknown contact: {}", target)))?;

        tracing::info!(contact = %name, "Call placed");

        if name == number {
            Ok(format!("📞 جاري الاتصال بـ {}", number))
        } else {
            Ok(format!("📞 جاري الاتصال بـ {} ({})", name, number))
        }
    }

    fn describe(&self, command: &ParsedCommand) -> String {
        format!(
            "Call: {}",
            command.argument.as_deref().unwrap_or("<no target>")
        )
    }
}
