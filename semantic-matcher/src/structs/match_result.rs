use serde::Serialize;

/// One ranked hit from the Q&A bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub question: String,
    pub answer: String,
    /// Cosine similarity between query and question.
    pub score: f32,
}

impl MatchResult {
    /// Score as a percentage rounded to one decimal (`0.8766` → `87.7`).
    pub fn confidence_pct(&self) -> f64 {
        (f64::from(self.score) * 1000.0).round() / 10.0
    }
}
