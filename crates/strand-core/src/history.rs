//! Conversation history
//!
//! Append-only log of user requests and agent responses. Entries are never
//! edited or reordered; `clear` is the only way to drop them.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::types::ExtractedArguments;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// What happened while answering a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    RoundTrip,
    MultiIntent,
    MissingParams(Vec<String>),
    ToolUsed { name: String, arguments: ExtractedArguments },
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationEntry {
    pub timestamp: DateTime<Local>,
    pub role: Role,
    pub payload: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl ConversationEntry {
    fn new(role: Role, payload: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            timestamp: Local::now(),
            role,
            payload: payload.into(),
            tags,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    entries: Vec<ConversationEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_user(&mut self, text: impl Into<String>) {
        self.entries.push(ConversationEntry::new(Role::User, text, Vec::new()));
    }

    pub fn record_agent(&mut self, response: impl Into<String>, tags: Vec<Tag>) {
        self.entries.push(ConversationEntry::new(Role::Agent, response, tags));
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> &[ConversationEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
