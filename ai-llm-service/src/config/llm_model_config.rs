use crate::config::llm_provider::LlmProvider;

/// Configuration for one model profile (completion or embedding).
///
/// # Fields
///
/// - `provider`: backend serving the model.
/// - `model`: model identifier as known to the backend (e.g. `"llama3.1:8b"`, `"all-minilm"`).
/// - `endpoint`: base URL of the backend, without the API path.
/// - `max_tokens`: generation cap (`num_predict` for Ollama); ignored for embeddings.
/// - `temperature`: sampling temperature; ignored for embeddings.
/// - `timeout_secs`: per-request timeout.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Ollama,
///     model: "all-minilm".to_string(),
///     endpoint: "http://localhost:11434".to_string(),
///     max_tokens: None,
///     temperature: None,
///     timeout_secs: Some(30),
/// };
/// assert_eq!(cfg.model, "all-minilm");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The backend serving this profile.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Backend base URL.
    pub endpoint: String,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
