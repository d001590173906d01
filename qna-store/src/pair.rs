use serde::{Deserialize, Serialize};

/// A stored question/answer tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QnaPair {
    pub question: String,
    pub answer: String,
}

impl QnaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Case-insensitive substring test on the question.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn question_contains(&self, needle_lower: &str) -> bool {
        self.question.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match_ignores_case() {
        let p = QnaPair::new("What is the Capital of France?", "Paris");
        assert!(p.question_contains("capital"));
        assert!(!p.question_contains("germany"));
    }

    #[test]
    fn serializes_as_plain_object() {
        let p = QnaPair::new("q", "a");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"question":"q","answer":"a"}"#);
    }
}
