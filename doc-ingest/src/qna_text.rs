use qna_store::QnaPair;

/// First line of a session document that holds Q&A pairs.
pub const DATA_HEADER: &str = "Data:\n";

/// True when the document is a `Data:` block rather than free text.
pub fn is_structured_document(text: &str) -> bool {
    text.trim_start().starts_with("Data:")
}

/// Reads `Q:`/`A:` line pairs back out of a document.
///
/// An `A:` line only counts when it follows a non-empty `Q:`; pairs with an
/// empty answer are dropped. Other lines are ignored.
pub fn parse_qna_text(text: &str) -> Vec<QnaPair> {
    let mut pairs = Vec::new();
    let mut question: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Q:") {
            let q = rest.trim();
            question = (!q.is_empty()).then(|| q.to_string());
        } else if let Some(rest) = line.strip_prefix("A:") {
            if let Some(q) = question.take() {
                let a = rest.trim();
                if !a.is_empty() {
                    pairs.push(QnaPair::new(q, a));
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_data_block() {
        assert!(is_structured_document("Data:\nQ: a\nA: b"));
        assert!(is_structured_document("\n  Data:"));
        assert!(!is_structured_document("Some notes about Data:"));
    }

    #[test]
    fn parses_pairs_and_skips_incomplete_ones() {
        let text = "Data:\nQ: What is X?\nA: X is Y\nQ: Dangling\nQ: Empty answer?\nA:   \nA: orphan\nQ: Second\nA: two\n";
        let pairs = parse_qna_text(text);
        assert_eq!(
            pairs,
            vec![
                QnaPair::new("What is X?", "X is Y"),
                QnaPair::new("Second", "two"),
            ]
        );
    }
}
