//! Typed error for the responder crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponderError {
    /// Completion backend failures (transport, status, timeout).
    #[error("{0}")]
    Completion(#[from] ai_llm_service::AiLlmError),

    /// Embedding/matching failures.
    #[error("matching failed: {0}")]
    Match(#[from] semantic_matcher::MatchError),
}
