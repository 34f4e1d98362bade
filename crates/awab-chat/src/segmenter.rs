//! Utterance segmentation.
//!
//! Splits one utterance into an ordered list of command candidates. The
//! separators are tried in priority order and the first one that yields
//! more than one non-empty piece wins; separators are never combined.
//!
//! Punctuation separators split on every occurrence of the raw substring.
//! Word separators ("ثم", "و", "then") differ from a plain substring split:
//! they only split at whitespace-delimited tokens equal to the word, compared
//! case-insensitively, so "افتح واتساب" is not cut at the "و" inside the app
//! name.

use regex::Regex;

use awab_core::config::default_separators;

use crate::error::ChatError;

enum Matcher {
    Literal,
    /// Matches whitespace-delimited tokens; the separator is one of them.
    Word(Regex),
}

struct Separator {
    token: String,
    /// Lower-cased token used for case-insensitive comparisons.
    folded: String,
    matcher: Matcher,
}

impl Separator {
    fn new(token: &str) -> Result<Self, ChatError> {
        if token.is_empty() {
            return Err(ChatError::InvalidSeparator(token.to_string()));
        }

        let matcher = if token.chars().all(char::is_alphabetic) {
            let words =
                Regex::new(r"\S+").map_err(|e| ChatError::InvalidSeparator(e.to_string()))?;
            Matcher::Word(words)
        } else {
            Matcher::Literal
        };

        Ok(Self {
            token: token.to_string(),
            folded: token.to_lowercase(),
            matcher,
        })
    }

    /// Split on every occurrence and trim each piece.
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let pieces: Vec<&str> = match &self.matcher {
            Matcher::Literal => text.split(self.token.as_str()).collect(),
            Matcher::Word(words) => {
                let mut pieces = Vec::new();
                let mut start = 0;
                for word in words.find_iter(text) {
                    if word.as_str().to_lowercase() == self.folded {
                        pieces.push(&text[start..word.start()]);
                        start = word.end();
                    }
                }
                pieces.push(&text[start..]);
                pieces
            }
        };
        pieces.into_iter().map(str::trim).collect()
    }
}

/// Splits utterances into command candidates using a fixed separator list.
pub struct Segmenter {
    separators: Vec<Separator>,
}

impl Default for Segmenter {
    fn default() -> Self {
        let separators = default_separators()
            .iter()
            .map(|s| Separator::new(s))
            .collect::<Result<Vec<_>, _>>()
            .expect("Invalid default separator");
        Self { separators }
    }
}

impl Segmenter {
    /// Build a segmenter from separators listed in priority order.
    pub fn new<S: AsRef<str>>(separators: &[S]) -> Result<Self, ChatError> {
        let separators = separators
            .iter()
            .map(|s| Separator::new(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { separators })
    }

    /// Separator tokens in priority order.
    pub fn tokens(&self) -> Vec<&str> {
        self.separators.iter().map(|s| s.token.as_str()).collect()
    }

    /// Segment an utterance.
    ///
    /// An utterance that is blank or made only of separator tokens yields no
    /// candidates. Otherwise returns the trimmed, non-empty pieces of the
    /// first separator that produces more than one, or the trimmed utterance
    /// as the only candidate. Pieces that merely look empty, such as a lone
    /// ".", are kept and attempted like any other command.
    pub fn segment(&self, utterance: &str) -> Vec<String> {
        let trimmed = utterance.trim();
        if self.is_blank(trimmed) {
            return Vec::new();
        }

        for separator in &self.separators {
            let pieces: Vec<String> = separator
                .split(trimmed)
                .into_iter()
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if pieces.len() > 1 {
                tracing::debug!(
                    separator = ?separator.token,
                    candidates = pieces.len(),
                    "Utterance split into multiple commands"
                );
                return pieces;
            }
        }

        vec![trimmed.to_string()]
    }

    /// True when `text` is nothing but separator tokens and whitespace.
    fn is_blank(&self, text: &str) -> bool {
        let folded = text.to_lowercase();
        let mut rest = folded.trim_start();
        while !rest.is_empty() {
            match self
                .separators
                .iter()
                .find_map(|s| rest.strip_prefix(s.folded.as_str()))
            {
                Some(remaining) => rest = remaining.trim_start(),
                None => return false,
            }
        }
        true
    }
}
