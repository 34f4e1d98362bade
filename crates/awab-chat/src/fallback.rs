//! Canned replies for utterances no command matched.
//!
//! Rules are checked in a fixed priority order with case-insensitive
//! substring matching; the first rule with any keyword contained in the
//! utterance wins.

use serde::{Deserialize, Serialize};

use crate::response;

/// Which fallback rule produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    Greeting,
    Permissions,
    Help,
    Settings,
    Unknown,
}

struct FallbackRule {
    kind: FallbackKind,
    keywords: &'static [&'static str],
    reply: &'static str,
    opens_settings: bool,
}

const RULES: &[FallbackRule] = &[
    FallbackRule {
        kind: FallbackKind::Greeting,
        keywords: &["مرحبا", "السلام", "هلا"],
        reply: response::GREETING_REPLY,
        opens_settings: false,
    },
    FallbackRule {
        kind: FallbackKind::Permissions,
        keywords: &["أذونات", "صلاحيات", "permission"],
        reply: response::PERMISSIONS_REPLY,
        opens_settings: true,
    },
    FallbackRule {
        kind: FallbackKind::Help,
        keywords: &["كيف", "ساعد", "help", "أوامر"],
        reply: response::HELP_REPLY,
        opens_settings: false,
    },
    FallbackRule {
        kind: FallbackKind::Settings,
        keywords: &["إعدادات", "settings"],
        reply: response::SETTINGS_REPLY,
        opens_settings: true,
    },
];

/// A canned reply plus whether the settings screen should be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackReply {
    pub kind: FallbackKind,
    pub text: &'static str,
    pub opens_settings: bool,
}

/// Keyword classifier producing canned replies. Pure: no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResponder;

impl FallbackResponder {
    pub fn new() -> Self {
        Self
    }

    /// Pick the reply for an utterance.
    pub fn reply(&self, utterance: &str) -> FallbackReply {
        let haystack = utterance.to_lowercase();
        RULES
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|kw| haystack.contains(&kw.to_lowercase()))
            })
            .map(|rule| FallbackReply {
                kind: rule.kind,
                text: rule.reply,
                opens_settings: rule.opens_settings,
            })
            .unwrap_or_else(Self::unknown)
    }

    /// Reply text only.
    pub fn respond(&self, utterance: &str) -> String {
        self.reply(utterance).text.to_string()
    }

    /// The generic "did not understand" reply.
    pub fn unknown() -> FallbackReply {
        FallbackReply {
            kind: FallbackKind::Unknown,
            text: response::UNKNOWN_REPLY,
            opens_settings: false,
        }
    }
}
