//! Command History
//!
//! Role-tagged conversation turns accumulated by the main entity and sent
//! to the interpreter as `chat_history`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of user/assistant exchanges kept
pub const DEFAULT_MAX_EXCHANGES: usize = 50;

/// Role of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

impl std::fmt::Display for HistoryRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryRole::User => write!(f, "user"),
            HistoryRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Assistant,
            content: content.into(),
        }
    }
}

/// Alternating user/assistant turns with an optional exchange cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandHistory {
    entries: VecDeque<HistoryEntry>,
    max_exchanges: Option<usize>,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_limit(Some(DEFAULT_MAX_EXCHANGES))
    }
}

impl CommandHistory {
    /// `None` keeps every exchange
    pub fn with_limit(max_exchanges: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_exchanges,
        }
    }

    pub fn unbounded() -> Self {
        Self::with_limit(None)
    }

    /// Record one completed exchange, evicting the oldest pair past the cap
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.entries.push_back(HistoryEntry::user(user));
        self.entries.push_back(HistoryEntry::assistant(assistant));

        if let Some(max) = self.max_exchanges {
            while self.entries.len() > max * 2 {
                self.entries.pop_front();
                self.entries.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Owned copy in wire order
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
