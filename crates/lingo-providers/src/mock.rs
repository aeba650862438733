//! Mock assistant for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use lingo_core::chat::ChatMessage;
use lingo_core::error::ProviderError;
use lingo_core::traits::{Assistant, Capability, ChunkStream};

/// A mock assistant for exercising hosts without real API calls.
///
/// Definitions are looked up by term; chat replies are streamed word by word
/// from a fixed reply.
pub struct MockAssistant {
    /// Map of term → definition.
    definitions: HashMap<String, String>,
    /// Reply streamed by `ask`.
    reply: String,
    /// Error message returned instead of a reply, if set.
    failure: Option<String>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// History received by the last `ask` call.
    last_history: Mutex<Option<Vec<ChatMessage>>>,
}

impl MockAssistant {
    /// Create a mock with the given term → definition mappings.
    pub fn new(definitions: HashMap<String, String>) -> Self {
        Self {
            definitions,
            reply: "no cap, that slaps".to_string(),
            failure: None,
            call_count: AtomicU32::new(0),
            last_history: Mutex::new(None),
        }
    }

    /// Create a mock whose chat reply is always `reply`.
    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Create a mock that fails every call with a provider error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(HashMap::new())
        }
    }

    /// Get the number of calls made to this assistant.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the history passed to the last `ask` call.
    pub fn last_history(&self) -> Option<Vec<ChatMessage>> {
        self.last_history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::ApiError {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Assistant for MockAssistant {
    fn name(&self) -> &str {
        "mock"
    }

    fn capability(&self) -> Capability {
        Capability::Enabled
    }

    async fn define(&self, term: &str) -> Result<String, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;

        Ok(self
            .definitions
            .get(term)
            .cloned()
            .unwrap_or_else(|| format!("Slang term '{term}'.")))
    }

    async fn ask(&self, history: &[ChatMessage]) -> Result<ChunkStream, ProviderError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_history.lock().unwrap_or_else(|e| e.into_inner()) = Some(history.to_vec());
        self.check_failure()?;

        let chunks: Vec<Result<String, ProviderError>> = self
            .reply
            .split_inclusive(' ')
            .map(|w| Ok(w.to_string()))
            .collect();
        Ok(stream::iter(chunks).boxed())
    }
}
