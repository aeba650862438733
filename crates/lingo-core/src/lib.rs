//! lingo-core: Quiz engine, term store, and assistant traits.
//!
//! This crate defines the data model, the quiz round generator and scorer,
//! JSON persistence for term stores, and the traits the rest of lingo
//! builds on.

pub mod chat;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;
pub mod traits;

pub use engine::{Prompt, QuizEngine, QuizRound, QuizSession, Verdict};
pub use error::{ProviderError, QuizError, StoreError};
pub use model::{normalize_term, TermEntry, TermStore};
