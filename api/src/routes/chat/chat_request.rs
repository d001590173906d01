use serde::Deserialize;

/// Request payload for /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Skip Q&A matching and ask the LLM directly.
    #[serde(default)]
    pub force_llm: bool,
}
