//! lingo-providers: LLM assistant backends.
//!
//! Implements the `Assistant` trait for OpenAI-compatible chat APIs, plus a
//! mock for tests, and loads the lingo configuration that decides which
//! backend (if any) is enabled.

pub mod config;
pub mod mock;
pub mod openai;
pub mod sse;

pub use config::{create_assistant, load_config, AssistantConfig, LingoConfig, QuizConfig};
pub use lingo_core::error::ProviderError;
