use serde::{Deserialize, Serialize};

/// Every device action the pattern set can recognize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    OpenApp,
    CloseApp,
    ListApps,
    Call,
    WifiOn,
    WifiOff,
    BluetoothOn,
    BluetoothOff,
    VolumeUp,
    VolumeDown,
    Back,
    Home,
    Screenshot,
    ReadScreen,
    Tap,
}

impl CommandKind {
    /// Kinds that drive the UI through the accessibility layer rather than
    /// a plain intent.
    pub fn needs_accessibility(&self) -> bool {
        matches!(
            self,
            CommandKind::CloseApp
                | CommandKind::WifiOn
                | CommandKind::WifiOff
                | CommandKind::BluetoothOn
                | CommandKind::BluetoothOff
                | CommandKind::Back
                | CommandKind::Home
                | CommandKind::Screenshot
                | CommandKind::ReadScreen
                | CommandKind::Tap
        )
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CommandKind::OpenApp => "open_app",
            CommandKind::CloseApp => "close_app",
            CommandKind::ListApps => "list_apps",
            CommandKind::Call => "call",
            CommandKind::WifiOn => "wifi_on",
            CommandKind::WifiOff => "wifi_off",
            CommandKind::BluetoothOn => "bluetooth_on",
            CommandKind::BluetoothOff => "bluetooth_off",
            CommandKind::VolumeUp => "volume_up",
            CommandKind::VolumeDown => "volume_down",
            CommandKind::Back => "back",
            CommandKind::Home => "home",
            CommandKind::Screenshot => "screenshot",
            CommandKind::ReadScreen => "read_screen",
            CommandKind::Tap => "tap",
        };
        write!(f, "{}", s)
    }
}

/// A command string matched against the pattern set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    pub kind: CommandKind,
    /// Captured target: app name, contact, or text to tap.
    pub argument: Option<String>,
    /// The trimmed command text as typed.
    pub raw: String,
}

/// Result of resolving one command string.
///
/// Recognition is carried as data; callers never inspect the message text
/// to decide whether a command was understood.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum ResolverOutcome {
    /// The command was understood and executed.
    Recognized(String),
    /// No command matched.
    Unrecognized,
}

impl ResolverOutcome {
    pub fn is_recognized(&self) -> bool {
        matches!(self, ResolverOutcome::Recognized(_))
    }
}
