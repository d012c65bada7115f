//! Match strategies
//!
//! Decide whether a free-text command refers to a capability label or a
//! child description. The router only sees the `MatchStrategy` trait.

use crate::domain::MatchMode;

/// Case-insensitive test of a command against a label or description
pub trait MatchStrategy: Send + Sync {
    fn matches(&self, command: &str, needle: &str) -> bool;
}

/// Lowercased command contains the lowercased needle anywhere.
///
/// An empty needle matches every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatch;

impl MatchStrategy for SubstringMatch {
    fn matches(&self, command: &str, needle: &str) -> bool {
        command.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Needle words appear as a contiguous run of whole command words.
///
/// Underscores count as word characters, so `count_words` is one token.
/// An empty needle never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordMatch;

impl MatchStrategy for WordMatch {
    fn matches(&self, command: &str, needle: &str) -> bool {
        let needle = tokens(needle);
        if needle.is_empty() {
            return false;
        }
        let command = tokens(command);
        command
            .windows(needle.len())
            .any(|window| window == needle.as_slice())
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Strategy implementing a configured mode
pub fn strategy_for(mode: MatchMode) -> Box<dyn MatchStrategy> {
    match mode {
        MatchMode::Substring => Box::new(SubstringMatch),
        MatchMode::Word => Box::new(WordMatch),
    }
}
