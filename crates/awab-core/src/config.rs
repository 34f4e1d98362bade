use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AwabError, Result};

/// Top-level configuration for Awab.
///
/// Loaded from `~/.awab/config.toml` by default. Every section is optional
/// and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwabConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub device: DeviceConfig,
}

impl AwabConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AwabConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AwabError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Conversation engine settings: pacing, segmentation and limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Pause between a user submission and the start of resolution.
    pub thinking_delay_ms: u64,
    /// Pause after each step of a multi-command batch.
    pub step_delay_ms: u64,
    /// Command separators in priority order. The first one that splits an
    /// utterance into more than one piece wins.
    pub separators: Vec<String>,
    /// Maximum accepted utterance length, in characters.
    pub max_message_length: usize,
    /// Assistant message posted when a session opens. Empty disables it.
    pub welcome_message: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 500,
            step_delay_ms: 1500,
            separators: default_separators(),
            max_message_length: 2000,
            welcome_message: "مرحباً! أنا أواب AI 🤖\n\nكيف يمكني مساعدتك اليوم؟".to_string(),
        }
    }
}

impl ChatConfig {
    /// Same settings with both pacing delays disabled.
    pub fn without_delays(mut self) -> Self {
        self.thinking_delay_ms = 0;
        self.step_delay_ms = 0;
        self
    }
}

/// Default separator priority: Arabic comma, comma, period, "then", "and", newline.
pub fn default_separators() -> Vec<String> {
    ["،", ",", ".", "ثم", "و", "\n"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// What the simulated device knows about: installed apps and contacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Application names that can be opened or closed.
    pub installed_apps: Vec<String>,
    /// Contact name to phone number.
    pub contacts: BTreeMap<String, String>,
    /// Longest a single handler may run before the command fails.
    pub handler_timeout_ms: u64,
    /// Whether commands that drive the UI through the accessibility layer
    /// (back, home, toggles, screenshot, tap...) are available.
    pub accessibility_enabled: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let installed_apps = [
            "واتساب",
            "يوتيوب",
            "تيليجرام",
            "انستقرام",
            "كروم",
            "الكاميرا",
            "الإعدادات",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let mut contacts = BTreeMap::new();
        contacts.insert("أحمد".to_string(), "0501234567".to_string());
        contacts.insert("محمد".to_string(), "0559876543".to_string());

        Self {
            installed_apps,
            contacts,
            handler_timeout_ms: 5000,
            accessibility_enabled: true,
        }
    }
}
