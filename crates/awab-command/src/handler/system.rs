//! System control handler.
//!
//! Simulates radio toggles, volume, navigation keys and screen actions.
//! Keeps a small in-memory device state so repeated toggles report
//! accurately.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CommandError;
use crate::handler::CommandHandler;
use crate::types::{CommandKind, ParsedCommand};

const MAX_VOLUME: u8 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    pub wifi: bool,
    pub bluetooth: bool,
    pub volume: u8,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            wifi: false,
            bluetooth: false,
            volume: 7,
        }
    }
}

/// Handler for toggles, volume, navigation and screen commands.
#[derive(Default)]
pub struct SystemHandler {
    state: Mutex<DeviceState>,
}

impl SystemHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the simulated device.
    pub fn state(&self) -> Result<DeviceState, CommandError> {
        self.state
            .lock()
            .map(|s| s.clone())
            .map_err(|e| CommandError::HandlerFailed(format!("device state lock poisoned: {}", e)))
    }
}

fn toggle_reply(label: &str, on: bool, changed: bool) -> String {
    match (on, changed) {
        (true, true) => format!("📶 تم تشغيل {}", label),
        (false, true) => format!("📴 تم إيقاف {}", label),
        (true, false) => format!("ℹ️ {} يعمل بالفعل", label),
        (false, false) => format!("ℹ️ {} متوقف بالفعل", label),
    }
}

#[async_trait]
impl CommandHandler for SystemHandler {
    fn kinds(&self) -> &'static [CommandKind] {
        &[
            CommandKind::WifiOn,
            CommandKind::WifiOff,
            CommandKind::BluetoothOn,
            CommandKind::BluetoothOff,
            CommandKind::VolumeUp,
            CommandKind::VolumeDown,
            CommandKind::Back,
            CommandKind::Home,
            CommandKind::Screenshot,
            CommandKind::ReadScreen,
            CommandKind::Tap,
        ]
    }

    async fn execute(&self, command: &ParsedCommand) -> Result<String, CommandError> {
        let mut state = self.state.lock().map_err(|e| {
            CommandError::HandlerFailed(format!("device state lock poisoned: {}", e))
        })?;

        let reply = match command.kind {
            CommandKind::WifiOn | CommandKind::WifiOff => {
                let on = command.kind == CommandKind::WifiOn;
                let changed = state.wifi != on;
                state.wifi = on;
                toggle_reply("الواي فاي", on, changed)
            }
            CommandKind::BluetoothOn | CommandKind::BluetoothOff => {
                let on = command.kind == CommandKind::BluetoothOn;
                let changed = state.bluetooth != on;
                state.bluetooth = on;
                toggle_reply("البلوتوث", on, changed)
            }
            CommandKind::VolumeUp => {
                state.volume = (state.volume + 1).min(MAX_VOLUME);
                format!("🔊 تم رفع الصوت ({}/{})", state.volume, MAX_VOLUME)
            }
            CommandKind::VolumeDown => {
                state.volume = state.volume.saturating_sub(1);
                format!("🔉 تم خفض الصوت ({}/{})", state.volume, MAX_VOLUME)
            }
            CommandKind::Back => "↩️ تم الرجوع".to_string(),
            CommandKind::Home => "🏠 تم الذهاب للشاشة الرئيسية".to_string(),
            CommandKind::Screenshot => "📸 تم أخذ لقطة شاشة".to_string(),
            CommandKind::ReadScreen => "📖 جاري قراءة الشاشة...".to_string(),
            CommandKind::Tap => {
                let text = command.argument.as_deref().ok_or_else(|| {
                    CommandError::InvalidCommand("tap target is missing".to_string())
                })?;
                format!("👆 تم الضغط على \"{}\"", text)
            }
            other => return Err(CommandError::UnregisteredHandler(other)),
        };

        tracing::info!(kind = %command.kind, "System command executed");
        Ok(reply)
    }

    fn describe(&self, command: &ParsedCommand) -> String {
        match command.argument.as_deref() {
            Some(arg) => format!("{}: {}", command.kind, arg),
            None => command.kind.to_string(),
        }
    }
}
