//! Trait definitions for the collaborators around the quiz engine.
//!
//! `TermRepository` is implemented by [`crate::store::JsonTermFile`];
//! `Assistant` is implemented by the `lingo-providers` crate.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::error::{ProviderError, StoreError};
use crate::model::TermStore;

// ---------------------------------------------------------------------------
// Term persistence
// ---------------------------------------------------------------------------

/// Load/save of a whole term store.
pub trait TermRepository: Send + Sync {
    /// Read the stored mapping.
    fn load(&self) -> Result<TermStore, StoreError>;

    /// Replace the stored mapping.
    fn save(&self, store: &TermStore) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// Whether an assistant can actually serve requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Enabled,
    Disabled,
}

impl Capability {
    pub fn is_enabled(self) -> bool {
        self == Capability::Enabled
    }
}

/// Streamed reply text. Finite and consumed once.
pub type ChunkStream = BoxStream<'static, Result<String, ProviderError>>;

/// Optional LLM backend used to define new terms and answer slang questions.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Human-readable backend name (e.g. "openai").
    fn name(&self) -> &str;

    /// Hosts check this flag instead of inspecting credentials.
    fn capability(&self) -> Capability;

    /// A short definition plus a usage example for `term`.
    async fn define(&self, term: &str) -> Result<String, ProviderError>;

    /// Stream a reply to the conversation `history`.
    async fn ask(&self, history: &[ChatMessage]) -> Result<ChunkStream, ProviderError>;
}

/// Stand-in used when no backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledAssistant;

#[async_trait]
impl Assistant for DisabledAssistant {
    fn name(&self) -> &str {
        "disabled"
    }

    fn capability(&self) -> Capability {
        Capability::Disabled
    }

    async fn define(&self, _term: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable)
    }

    async fn ask(&self, _history: &[ChatMessage]) -> Result<ChunkStream, ProviderError> {
        Err(ProviderError::Unavailable)
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

/// System prompt that opens every chat transcript.
pub const CHAT_SYSTEM_PROMPT: &str = "You are an expert on modern internet slang.";

/// Prompt asking for a one-sentence definition of `term` with an example.
pub fn definition_prompt(term: &str) -> String {
    format!(
        "Explain the Gen Z slang term '{term}' in a single concise sentence, \
         then give one short usage example in quotes."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_assistant_reports_unavailable() {
        let assistant = DisabledAssistant;
        assert_eq!(assistant.capability(), Capability::Disabled);
        assert!(!assistant.capability().is_enabled());

        let err = assistant.define("rizz").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable));

        let err = assistant.ask(&[]).await.err().unwrap();
        assert!(err.is_authentication());
    }

    #[test]
    fn definition_prompt_mentions_term() {
        let prompt = definition_prompt("delulu");
        assert!(prompt.contains("'delulu'"));
        assert!(prompt.contains("usage example"));
    }
}
