//! Typed error for the semantic-matcher crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// The embedding backend failed (transport, status, decode).
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The backend returned fewer vectors than inputs, or an empty vector.
    #[error("embedding backend returned {got} vectors for {want} inputs")]
    EmptyEmbedding { got: usize, want: usize },

    /// Query and question vectors have different sizes.
    #[error("vector size mismatch: query {query}, questions {questions}")]
    DimensionMismatch { query: usize, questions: usize },

    /// Question vectors of one batch differ in size.
    #[error("question vector {index} has size {len}, expected {want}")]
    RaggedEmbeddings { index: usize, len: usize, want: usize },
}

impl From<ai_llm_service::AiLlmError> for MatchError {
    fn from(err: ai_llm_service::AiLlmError) -> Self {
        MatchError::Embedding(err.to_string())
    }
}
