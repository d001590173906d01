use serde::Serialize;

/// Response payload for /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub full_history: Vec<String>,
    /// Bank searched, nothing above threshold; the UI offers an LLM retry.
    pub no_qna_match: bool,
    pub last_question: String,
    pub no_qna_match_message: Option<String>,
}
