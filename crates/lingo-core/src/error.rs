//! Error types for the quiz core, term persistence, and assistant backends.
//!
//! `ProviderError` lives here rather than in `lingo-providers` so hosts can
//! classify assistant failures (missing credential, bad credential, transport
//! fault) without depending on a concrete backend.

use std::path::PathBuf;

use thiserror::Error;

/// Precondition failures of the quiz engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The store is too small to form a question with at least one distractor.
    #[error("need at least 2 terms to start a quiz round, store has {available}")]
    InsufficientTerms { available: usize },

    /// The operation requires an active round and there is none.
    #[error("no active quiz round")]
    NoActiveRound,
}

/// Failures of the term persistence medium.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("term store unavailable at {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but does not hold a term mapping.
    #[error("term store at {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The store could not be rendered for writing; nothing was written.
    #[error("could not encode terms for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A term that normalizes to the empty string.
    #[error("invalid term: {0:?}")]
    InvalidTerm(String),
}

impl StoreError {
    /// Returns `true` if the backing file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Errors that can occur when talking to an assistant backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No backend or credential is configured.
    #[error("AI assistant is not configured (set OPENAI_API_KEY or add an [assistant] section)")]
    Unavailable,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Returns `true` for a missing or rejected credential.
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            ProviderError::Unavailable | ProviderError::AuthenticationFailed(_)
        )
    }

    /// Returns `true` if this error is permanent and retrying cannot help.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::Unavailable
                | ProviderError::AuthenticationFailed(_)
                | ProviderError::MalformedResponse(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            ProviderError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}
