//! Linear chat transcript for the slang helper.

use serde::{Deserialize, Serialize};

use crate::traits::CHAT_SYSTEM_PROMPT;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered conversation history, opened by a system message.
///
/// Turns are only recorded once a reply has completed: build the request
/// with [`pending`](Self::pending), then [`commit`](Self::commit) on success.
/// A failed call therefore leaves the transcript as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(CHAT_SYSTEM_PROMPT)
    }
}

impl Transcript {
    pub fn new(system_prompt: &str) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of completed question/answer exchanges.
    pub fn exchanges(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .count()
    }

    /// History to send for `question`, without recording it.
    pub fn pending(&self, question: &str) -> Vec<ChatMessage> {
        let mut history = self.messages.clone();
        history.push(ChatMessage::user(question));
        history
    }

    /// Record a completed exchange.
    pub fn commit(&mut self, question: &str, reply: &str) {
        self.messages.push(ChatMessage::user(question));
        self.messages.push(ChatMessage::assistant(reply));
    }

    /// Drop every exchange, keeping the system message.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }
}
