//! Regex-based command pattern matching.
//!
//! Patterns are tried in declaration order and the first match wins, so
//! narrow phrases ("شغل الواي فاي") are listed before broad ones
//! ("شغل <app>").

use regex::Regex;

use crate::types::{CommandKind, ParsedCommand};

/// A single compiled regex pattern linked to a command kind.
///
/// When the regex has a capture group, group 1 is the command argument.
pub struct CommandPattern {
    pub regex: Regex,
    pub kind: CommandKind,
}

/// Ordered collection of all command patterns, compiled once and reused.
pub struct CommandPatternSet {
    patterns: Vec<CommandPattern>,
}

impl Default for CommandPatternSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPatternSet {
    /// Create a new CommandPatternSet with all compiled patterns.
    pub fn new() -> Self {
        let table: Vec<(CommandKind, &str)> = vec![
            // =================================================================
            // Fixed phrases
            // =================================================================
            (
                CommandKind::ListApps,
                r"(?i)^(?:اعرض|عرض|ورني)\s+(?:ال)?تطبيقات$",
            ),
            (
                CommandKind::WifiOn,
                r"(?i)^(?:شغل|افتح|فعل)\s+(?:ال)?(?:واي\s?فاي|wi-?fi)$",
            ),
            (
                CommandKind::WifiOff,
                r"(?i)^(?:طفي|اطفي|أطفئ|سكر|اقفل|أقفل)\s+(?:ال)?(?:واي\s?فاي|wi-?fi)$",
            ),
            (
                CommandKind::BluetoothOn,
                r"(?i)^(?:شغل|افتح|فعل)\s+(?:ال)?(?:بلوتوث|bluetooth)$",
            ),
            (
                CommandKind::BluetoothOff,
                r"(?i)^(?:طفي|اطفي|أطفئ|سكر|اقفل|أقفل)\s+(?:ال)?(?:بلوتوث|bluetooth)$",
            ),
            (CommandKind::VolumeUp, r"(?i)^(?:على|علي|ارفع)\s+(?:ال)?صوت$"),
            (
                CommandKind::VolumeDown,
                r"(?i)^(?:خفض|اخفض|وطي|نزل)\s+(?:ال)?صوت$",
            ),
            (
                CommandKind::Screenshot,
                r"(?i)^(?:سكرين\s?شوت|screenshot|لقطة\s+شاشة|صور\s+الشاشة)$",
            ),
            (
                CommandKind::ReadScreen,
                r"(?i)^(?:اقرا|اقرأ|إقرأ|إقرا)\s+(?:ال)?شاشة$",
            ),
            (CommandKind::Back, r"(?i)^(?:رجوع|ارجع|back)$"),
            (
                CommandKind::Home,
                r"(?i)^(?:هوم|home|الرئيسية|الشاشة\s+الرئيسية)$",
            ),
            // =================================================================
            // Phrases with an argument
            // =================================================================
            (CommandKind::Tap, r#"(?i)^اضغط\s+على\s+["“«]?(.+?)["”»]?$"#),
            (CommandKind::Call, r"(?i)^(?:اتصل|إتصل|كلم|اضرب|إضرب)\s+(.+)$"),
            (
                CommandKind::CloseApp,
                r"(?i)^(?:أقفل|اقفل|سكر|اغلق|أغلق)\s+(.+)$",
            ),
            (CommandKind::OpenApp, r"(?i)^(?:افتح|إفتح|شغل)\s+(.+)$"),
        ];

        let patterns = table
            .into_iter()
            .map(|(kind, pat)| CommandPattern {
                regex: Regex::new(pat).expect("Invalid command regex"),
                kind,
            })
            .collect();

        Self { patterns }
    }

    /// Match a single command string against the pattern set.
    ///
    /// Returns `None` when no pattern matches.
    pub fn parse(&self, command: &str) -> Option<ParsedCommand> {
        let raw = command.trim();
        if raw.is_empty() {
            return None;
        }

        self.patterns.iter().find_map(|pattern| {
            pattern.regex.captures(raw).map(|caps| ParsedCommand {
                kind: pattern.kind,
                argument: caps
                    .get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty()),
                raw: raw.to_string(),
            })
        })
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(input: &str) -> Option<CommandKind> {
        CommandPatternSet::new().parse(input).map(|c| c.kind)
    }

    fn arg_of(input: &str) -> Option<String> {
        CommandPatternSet::new()
            .parse(input)
            .and_then(|c| c.argument)
    }

    #[test]
    fn test_all_patterns_compile() {
        let set = CommandPatternSet::new();
        assert_eq!(set.len(), 15);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_open_app() {
        assert_eq!(kind_of("افتح واتساب"), Some(CommandKind::OpenApp));
        assert_eq!(arg_of("افتح واتساب"), Some("واتساب".to_string()));
        assert_eq!(arg_of("  افتح   يوتيوب  "), Some("يوتيوب".to_string()));
    }

    #[test]
    fn test_wifi_beats_open_app() {
        assert_eq!(kind_of("شغل الواي فاي"), Some(CommandKind::WifiOn));
        assert_eq!(kind_of("افتح الوايفاي"), Some(CommandKind::WifiOn));
        assert_eq!(kind_of("طفي الواي فاي"), Some(CommandKind::WifiOff));
        assert_eq!(kind_of("شغل WiFi"), Some(CommandKind::WifiOn));
    }

    #[test]
    fn test_bluetooth() {
        assert_eq!(kind_of("شغل البلوتوث"), Some(CommandKind::BluetoothOn));
        assert_eq!(kind_of("اطفي البلوتوث"), Some(CommandKind::BluetoothOff));
    }

    #[test]
    fn test_close_app() {
        assert_eq!(kind_of("أقفل واتساب"), Some(CommandKind::CloseApp));
        assert_eq!(arg_of("اقفل يوتيوب"), Some("يوتيوب".to_string()));
        // Closing the wifi is a toggle, not an app
        assert_eq!(kind_of("اقفل الواي فاي"), Some(CommandKind::WifiOff));
    }

    #[test]
    fn test_list_apps() {
        assert_eq!(kind_of("اعرض التطبيقات"), Some(CommandKind::ListApps));
    }

    #[test]
    fn test_call_variants() {
        assert_eq!(kind_of("اتصل أحمد"), Some(CommandKind::Call));
        assert_eq!(arg_of("اتصل بأحمد"), Some("بأحمد".to_string()));
        assert_eq!(arg_of("اضرب لأحمد"), Some("لأحمد".to_string()));
        assert_eq!(kind_of("كلم محمد"), Some(CommandKind::Call));
        assert_eq!(arg_of("اتصل 0501234567"), Some("0501234567".to_string()));
    }

    #[test]
    fn test_volume() {
        assert_eq!(kind_of("على الصوت"), Some(CommandKind::VolumeUp));
        assert_eq!(kind_of("خفض الصوت"), Some(CommandKind::VolumeDown));
    }

    #[test]
    fn test_navigation_and_screen() {
        assert_eq!(kind_of("رجوع"), Some(CommandKind::Back));
        assert_eq!(kind_of("هوم"), Some(CommandKind::Home));
        assert_eq!(kind_of("سكرين شوت"), Some(CommandKind::Screenshot));
        assert_eq!(kind_of("اقرا الشاشة"), Some(CommandKind::ReadScreen));
    }

    #[test]
    fn test_tap_strips_quotes() {
        assert_eq!(kind_of("اضغط على \"إرسال\""), Some(CommandKind::Tap));
        assert_eq!(arg_of("اضغط على \"إرسال\""), Some("إرسال".to_string()));
        assert_eq!(arg_of("اضغط على موافق"), Some("موافق".to_string()));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(kind_of("مرحبا"), None);
        assert_eq!(kind_of(""), None);
        assert_eq!(kind_of("   "), None);
        assert_eq!(kind_of("افتح"), None);
    }

    #[test]
    fn test_raw_is_trimmed() {
        let parsed = CommandPatternSet::new().parse("  رجوع ").unwrap();
        assert_eq!(parsed.raw, "رجوع");
        assert_eq!(parsed.argument, None);
    }
}
